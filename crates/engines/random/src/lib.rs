//! Random Move Agent
//!
//! Picks uniformly at random from every legal move of the side to play. This is
//! the opponent the game host puts across the board from a human player.

use chess_core::{Agent, GameState, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// An agent that plays random legal moves.
///
/// There is no evaluation at all: each legal move is equally likely.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
    moves_played: u64,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            moves_played: 0,
        }
    }

    /// Deterministic agent, for tests and reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            moves_played: 0,
        }
    }

    pub fn moves_played(&self) -> u64 {
        self.moves_played
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, state: &GameState) -> Option<Move> {
        let moves = state.all_legal_moves();
        let choice = moves.choose(&mut self.rng).copied();

        match choice {
            Some(mv) => {
                self.moves_played += 1;
                tracing::debug!(
                    side = %state.side_to_move,
                    candidates = moves.len(),
                    chosen = %mv,
                    "random agent picked a move"
                );
            }
            None => tracing::debug!(side = %state.side_to_move, "no legal move for agent"),
        }
        choice
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.moves_played = 0;
    }
}
