//! One game between a human and the agent.

use chess_core::{Agent, Board, CastlingRights, Color, GameState, GameStatus, Move, MoveError};
use serde::Serialize;
use tokio::task::AbortHandle;
use uuid::Uuid;

use crate::error::ApiError;

/// The agent's move that has been picked but not yet played.
#[derive(Debug)]
pub struct PendingAgentMove {
    pub mv: Move,
    pub handle: AbortHandle,
}

pub struct GameSession {
    pub id: Uuid,
    pub state: GameState,
    pub agent_color: Color,
    /// Last move played (for highlighting)
    pub last_move: Option<Move>,
    /// The agent's move while it is pending and briefly after it lands
    pub agent_flash: Option<Move>,
    pub history: Vec<Move>,
    /// Bumped on every move; a deferred agent move only lands if it still matches
    pub generation: u64,
    agent: Box<dyn Agent>,
    pending: Option<PendingAgentMove>,
}

/// What the client gets back from every game endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub id: Uuid,
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub status: GameStatus,
    pub in_check: bool,
    pub last_move: Option<Move>,
    pub agent_flash: Option<Move>,
    pub agent_color: Color,
    pub agent_name: String,
    pub agent_thinking: bool,
    pub history: Vec<String>,
}

impl GameSession {
    pub fn new(id: Uuid, agent_color: Color, mut agent: Box<dyn Agent>) -> Self {
        agent.new_game();
        Self {
            id,
            state: GameState::new(),
            agent_color,
            last_move: None,
            agent_flash: None,
            history: Vec::new(),
            generation: 0,
            agent,
            pending: None,
        }
    }

    pub fn is_agent_turn(&self) -> bool {
        self.state.side_to_move == self.agent_color
    }

    pub fn is_over(&self) -> bool {
        !self.state.has_any_legal_move()
    }

    pub fn agent_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate and play a move for the human side.
    pub fn human_move(&mut self, mv: Move) -> Result<(), ApiError> {
        if self.is_over() {
            return Err(MoveError::GameOver.into());
        }
        if self.is_agent_turn() {
            return Err(ApiError::AgentTurn);
        }
        let next = self.state.play(mv)?;
        self.agent_flash = None;
        self.record(mv, next);
        Ok(())
    }

    /// Ask the agent for a move if it is its turn and nothing is pending yet.
    pub fn pick_agent_move(&mut self) -> Option<Move> {
        if !self.is_agent_turn() || self.pending.is_some() {
            return None;
        }
        self.agent.choose_move(&self.state)
    }

    pub fn set_pending(&mut self, mv: Move, handle: AbortHandle) {
        self.agent_flash = Some(mv);
        self.pending = Some(PendingAgentMove { mv, handle });
    }

    /// Land the pending agent move. Called from the deferred task itself, so the
    /// handle is dropped rather than aborted.
    pub fn complete_agent_move(&mut self) -> Option<Move> {
        let pending = self.pending.take()?;
        match self.state.play(pending.mv) {
            Ok(next) => {
                self.record(pending.mv, next);
                Some(pending.mv)
            }
            Err(err) => {
                tracing::warn!(game = %self.id, mv = %pending.mv, %err, "agent move rejected");
                self.agent_flash = None;
                None
            }
        }
    }

    /// Abort a pending agent move, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            self.agent_flash = None;
            tracing::debug!(game = %self.id, mv = %pending.mv, "pending agent move cancelled");
        }
    }

    fn record(&mut self, mv: Move, next: GameState) {
        self.state = next;
        self.last_move = Some(mv);
        self.history.push(mv);
        self.generation += 1;

        let status = self.state.status();
        if status.is_over() {
            tracing::info!(game = %self.id, ?status, moves = self.history.len(), "game finished");
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id,
            board: self.state.board,
            side_to_move: self.state.side_to_move,
            castling_rights: self.state.castling_rights,
            status: self.state.status(),
            in_check: self.state.in_check(),
            last_move: self.last_move,
            agent_flash: self.agent_flash,
            agent_color: self.agent_color,
            agent_name: self.agent.name().to_string(),
            agent_thinking: self.agent_thinking(),
            history: self.history.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
