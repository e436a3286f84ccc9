use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8×8 grid of squares, indexed `[row][col]`.
///
/// `Board` is a plain `Copy` value: every transition returns a new board and the
/// input is never touched, so "before" and "after" boards can't alias.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard starting position.
    pub fn initial() -> Self {
        let mut b = Board::empty();
        for color in [Color::White, Color::Black] {
            let back = color.back_row() as usize;
            let pawns = color.pawn_row() as usize;
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                b.squares[back][col] = Some(Piece::new(color, kind));
                b.squares[pawns][col] = Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        b
    }

    pub fn piece_at(&self, sq: Coord) -> Option<Piece> {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    fn set(&mut self, sq: Coord, pc: Option<Piece>) {
        self.squares[sq.row() as usize][sq.col() as usize] = pc;
    }

    /// Returns a copy of the board with `pc` placed on `sq`.
    pub fn with_piece(mut self, sq: Coord, pc: Piece) -> Self {
        self.set(sq, Some(pc));
        self
    }

    /// Returns a copy of the board with `sq` emptied.
    pub fn without_piece(mut self, sq: Coord) -> Self {
        self.set(sq, None);
        self
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn find_king(&self, c: Color) -> Option<Coord> {
        self.pieces()
            .find(|&(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Move whatever stands on `from` to `to` and return the resulting board.
    ///
    /// A king travelling two columns castles: the rook from the matching corner
    /// lands next to the king on the side it came from. A pawn reaching either
    /// end row becomes a queen. Legality is not checked here; if `from` is empty
    /// the board comes back unchanged.
    pub fn apply_move(&self, from: Coord, to: Coord) -> Board {
        let Some(moved) = self.piece_at(from) else {
            return *self;
        };
        let mut next = *self;

        if moved.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2 {
            let (rook_from_col, rook_to_col) = if to.col() > from.col() {
                (7, to.col() - 1)
            } else {
                (0, to.col() + 1)
            };
            if let (Some(rf), Some(rt)) = (
                Coord::new(to.row(), rook_from_col),
                Coord::new(to.row(), rook_to_col),
            ) && let Some(rook) = next.piece_at(rf)
            {
                next.set(rf, None);
                next.set(rt, Some(rook));
            }
        }

        next.set(from, None);
        next.set(to, Some(moved));

        // Promotion (always to a queen)
        if moved.kind == PieceKind::Pawn && (to.row() == 0 || to.row() == 7) {
            next.set(to, Some(Piece::new(moved.color, PieceKind::Queen)));
        }

        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - r)?;
            for sq in row {
                match sq {
                    Some(pc) => write!(f, " {}", pc.symbol())?,
                    None => write!(f, " ·")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
