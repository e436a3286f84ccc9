pub mod attacks;
pub mod board;
pub mod castling;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

// Re-export the rules surface
pub use attacks::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};
pub use board::*;
pub use castling::*;
pub use game::*;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use types::*;

// =============================================================================
// Agent trait
// =============================================================================

/// Something that can play one side of a game.
///
/// The host asks for a move whenever the agent's side is to play and applies the
/// answer itself, so agents never see mutable game state.
pub trait Agent: Send {
    /// Pick a move for `state.side_to_move`.
    ///
    /// # Returns
    /// A move from `state.all_legal_moves()`, or `None` when there is none
    /// (checkmate or stalemate).
    fn choose_move(&mut self, state: &GameState) -> Option<Move>;

    /// Display name for logs and the API
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
