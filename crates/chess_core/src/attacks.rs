//! Offset tables and the attack oracle.
//!
//! Attacks are computed by looking outwards from the target square rather than
//! by generating every enemy move, so a piece still "attacks" a square even when
//! moving there would expose its own king.

use crate::{board::Board, types::*};

/// (row, col) steps of a knight.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// First occupied square along a ray from `from` (exclusive).
fn first_on_ray(board: &Board, from: Coord, (dr, dc): (i8, i8)) -> Option<Piece> {
    let mut cur = from.offset(dr, dc);
    while let Some(s) = cur {
        if let Some(pc) = board.piece_at(s) {
            return Some(pc);
        }
        cur = s.offset(dr, dc);
    }
    None
}

impl Board {
    pub fn is_square_attacked(&self, target: Coord, by: Color) -> bool {
        let has = |s: Option<Coord>, kind: PieceKind| {
            s.and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.color == by && pc.kind == kind)
        };

        // Pawns of `by` sit one step behind the target relative to their direction
        let back = -by.forward();
        if has(target.offset(back, -1), PieceKind::Pawn)
            || has(target.offset(back, 1), PieceKind::Pawn)
        {
            return true;
        }

        if KNIGHT_OFFSETS
            .iter()
            .any(|&(dr, dc)| has(target.offset(dr, dc), PieceKind::Knight))
        {
            return true;
        }

        if KING_OFFSETS
            .iter()
            .any(|&(dr, dc)| has(target.offset(dr, dc), PieceKind::King))
        {
            return true;
        }

        // Sliding: the first piece on the ray decides
        let slider = |dirs: &[(i8, i8)], kind: PieceKind| {
            dirs.iter().any(|&dir| {
                first_on_ray(self, target, dir).is_some_and(|pc| {
                    pc.color == by && (pc.kind == kind || pc.kind == PieceKind::Queen)
                })
            })
        };
        slider(&ORTHOGONALS, PieceKind::Rook) || slider(&DIAGONALS, PieceKind::Bishop)
    }

    /// Is `c`'s king attacked? A board without that king is never in check.
    pub fn in_check(&self, c: Color) -> bool {
        match self.find_king(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.opposite()),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
