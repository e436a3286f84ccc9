//! Position builders for tests.

use crate::{board::Board, types::*};

/// Build a board from eight rows, row 0 (black's back rank) first.
/// Upper case is white, lower case black, `.` an empty square.
pub fn board_from_rows(rows: [&str; 8]) -> Board {
    let mut board = Board::empty();
    for (r, line) in rows.iter().enumerate() {
        assert_eq!(line.chars().count(), 8, "row {r} must have 8 squares");
        for (c, ch) in line.chars().enumerate() {
            if ch == '.' {
                continue;
            }
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let kind = match ch.to_ascii_lowercase() {
                'k' => PieceKind::King,
                'q' => PieceKind::Queen,
                'r' => PieceKind::Rook,
                'b' => PieceKind::Bishop,
                'n' => PieceKind::Knight,
                'p' => PieceKind::Pawn,
                _ => panic!("unknown piece char {ch}"),
            };
            let sq = Coord::new(r as u8, c as u8).unwrap();
            board = board.with_piece(sq, Piece::new(color, kind));
        }
    }
    board
}

/// Shorthand for algebraic squares in assertions.
pub fn sq(s: &str) -> Coord {
    Coord::from_algebraic(s).unwrap_or_else(|| panic!("bad square {s}"))
}

/// Sorted algebraic names, for order-independent comparisons.
pub fn names(moves: &[Coord]) -> Vec<String> {
    let mut v: Vec<String> = moves.iter().map(|c| c.to_algebraic()).collect();
    v.sort();
    v
}
