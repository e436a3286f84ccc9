//! Game state transitions and end-of-game classification.

use crate::{
    board::Board,
    castling::CastlingRights,
    movegen::{legal_moves, legal_moves_into},
    types::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// True if any piece of `color` has at least one legal move.
pub fn has_any_legal_move(board: &Board, color: Color, castling: Option<&CastlingRights>) -> bool {
    let mut buf = Vec::with_capacity(28);
    board.pieces().any(|(sq, pc)| {
        if pc.color != color {
            return false;
        }
        legal_moves_into(board, sq, color, castling, &mut buf);
        !buf.is_empty()
    })
}

pub fn is_checkmate(board: &Board, color: Color, castling: Option<&CastlingRights>) -> bool {
    board.in_check(color) && !has_any_legal_move(board, color, castling)
}

pub fn is_stalemate(board: &Board, color: Color, castling: Option<&CastlingRights>) -> bool {
    !board.in_check(color) && !has_any_legal_move(board, color, castling)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,
    #[error("no piece on {0}")]
    NoPiece(Coord),
    #[error("the piece on {0} belongs to the side not to move")]
    NotYourPiece(Coord),
    #[error("{0} is not a legal move")]
    IllegalMove(Move),
}

/// Everything the rules need to know about a game in progress.
///
/// Transitions return a fresh `GameState`; nothing is mutated in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::all(),
        }
    }

    pub fn from_parts(board: Board, side_to_move: Color, castling_rights: CastlingRights) -> Self {
        Self {
            board,
            side_to_move,
            castling_rights,
        }
    }

    pub fn legal_moves_from(&self, from: Coord) -> Vec<Coord> {
        legal_moves(
            &self.board,
            from,
            self.side_to_move,
            Some(&self.castling_rights),
        )
    }

    /// Every legal move for the side to move, in row-major order of origin.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        let mut buf = Vec::with_capacity(28);
        for (from, pc) in self.board.pieces() {
            if pc.color != self.side_to_move {
                continue;
            }
            legal_moves_into(
                &self.board,
                from,
                self.side_to_move,
                Some(&self.castling_rights),
                &mut buf,
            );
            out.extend(buf.iter().map(|&to| Move::new(from, to)));
        }
        out
    }

    /// Play `mv` without checking it. Callers are expected to take moves from
    /// [`GameState::all_legal_moves`] or [`GameState::legal_moves_from`].
    pub fn apply(&self, mv: Move) -> GameState {
        GameState {
            board: self.board.apply_move(mv.from, mv.to),
            side_to_move: self.side_to_move.opposite(),
            castling_rights: self
                .castling_rights
                .after_move(&self.board, mv.from, mv.to),
        }
    }

    /// Validate `mv` against the legal set and play it.
    pub fn play(&self, mv: Move) -> Result<GameState, MoveError> {
        let pc = self
            .board
            .piece_at(mv.from)
            .ok_or(MoveError::NoPiece(mv.from))?;
        if pc.color != self.side_to_move {
            return Err(MoveError::NotYourPiece(mv.from));
        }
        if !self.has_any_legal_move() {
            return Err(MoveError::GameOver);
        }
        if !self.legal_moves_from(mv.from).contains(&mv.to) {
            return Err(MoveError::IllegalMove(mv));
        }
        Ok(self.apply(mv))
    }

    pub fn in_check(&self) -> bool {
        self.board.in_check(self.side_to_move)
    }

    pub fn has_any_legal_move(&self) -> bool {
        has_any_legal_move(
            &self.board,
            self.side_to_move,
            Some(&self.castling_rights),
        )
    }

    pub fn is_checkmate(&self) -> bool {
        is_checkmate(
            &self.board,
            self.side_to_move,
            Some(&self.castling_rights),
        )
    }

    pub fn is_stalemate(&self) -> bool {
        is_stalemate(
            &self.board,
            self.side_to_move,
            Some(&self.castling_rights),
        )
    }

    pub fn status(&self) -> GameStatus {
        let in_check = self.in_check();
        match (in_check, self.has_any_legal_move()) {
            (true, false) => GameStatus::Checkmate {
                winner: self.side_to_move.opposite(),
            },
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Ongoing,
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
