use crate::{board::Board, types::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl SideRights {
    pub const ALL: SideRights = SideRights {
        kingside: true,
        queenside: true,
    };
    pub const NONE: SideRights = SideRights {
        kingside: false,
        queenside: false,
    };
}

/// Which castling moves each side may still make.
///
/// Rights are only ever revoked: once a king or one of its rooks has moved, or
/// the rook was captured on its corner, the flag stays false for the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white: SideRights,
    pub black: SideRights,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            white: SideRights::ALL,
            black: SideRights::ALL,
        }
    }

    pub fn none() -> Self {
        Self {
            white: SideRights::NONE,
            black: SideRights::NONE,
        }
    }

    pub fn side(&self, c: Color) -> SideRights {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn side_mut(&mut self, c: Color) -> &mut SideRights {
        match c {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Rights after `from -> to` is played on `before`.
    pub fn after_move(&self, before: &Board, from: Coord, to: Coord) -> CastlingRights {
        let mut next = *self;
        let Some(moved) = before.piece_at(from) else {
            return next;
        };

        match moved.kind {
            PieceKind::King => *next.side_mut(moved.color) = SideRights::NONE,
            PieceKind::Rook => next.revoke_corner(moved.color, from),
            _ => {}
        }

        // A rook captured on its home corner takes that right with it
        if let Some(captured) = before.piece_at(to)
            && captured.kind == PieceKind::Rook
        {
            next.revoke_corner(captured.color, to);
        }

        next
    }

    fn revoke_corner(&mut self, c: Color, sq: Coord) {
        if sq.row() != c.back_row() {
            return;
        }
        let rights = self.side_mut(c);
        match sq.col() {
            0 => rights.queenside = false,
            7 => rights.kingside = false,
            _ => {}
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
#[path = "castling_tests.rs"]
mod castling_tests;
