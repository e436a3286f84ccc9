//! Deferred agent replies.
//!
//! The agent picks its move immediately, but the move only lands after
//! `agent_delay`. A move by the human, or deleting the game, invalidates it.

use uuid::Uuid;

use crate::session::GameSession;
use crate::AppState;

/// Pick the agent's move now and schedule it to land later.
///
/// Does nothing if it is not the agent's turn, the game is over, or a move is
/// already pending.
pub fn schedule_agent_move(app: &AppState, session: &mut GameSession) {
    let Some(mv) = session.pick_agent_move() else {
        return;
    };

    let id = session.id;
    let generation = session.generation;
    let app_task = app.clone();
    tracing::debug!(game = %id, %mv, "agent move scheduled");

    let handle = tokio::spawn(async move {
        land_agent_move(app_task, id, generation).await;
    });
    session.set_pending(mv, handle.abort_handle());
}

async fn land_agent_move(app: AppState, id: Uuid, generation: u64) {
    tokio::time::sleep(app.config.agent_delay()).await;

    let landed = {
        let mut sessions = app.sessions.lock().await;
        let Some(session) = sessions.get_mut(&id) else {
            return;
        };
        if session.generation != generation {
            return;
        }
        session.complete_agent_move()
    };
    let Some(mv) = landed else {
        return;
    };
    tracing::info!(game = %id, %mv, "agent moved");

    tokio::time::sleep(app.config.flash()).await;

    let mut sessions = app.sessions.lock().await;
    if let Some(session) = sessions.get_mut(&id) {
        if session.generation == generation + 1 {
            session.agent_flash = None;
        }
    }
}
