//! HTTP host: game sessions against the random agent, plus the static client.

pub mod agent;
pub mod config;
pub mod error;
pub mod session;

use std::collections::HashMap;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chess_core::{Coord, Move};
use random_engine::RandomAgent;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use agent::schedule_agent_move;
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use session::{GameSession, GameSnapshot};

/// Shared handler state. Sessions live only in memory.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub sessions: Arc<Mutex<HashMap<Uuid, GameSession>>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub from: Coord,
    pub to: Coord,
}

/// Square probe. Kept as raw text so that any input, including missing or
/// non-numeric values, reaches the handler.
#[derive(Debug, Default, Deserialize)]
pub struct MovesQuery {
    pub row: Option<String>,
    pub col: Option<String>,
}

impl MovesQuery {
    /// The probed square, or `None` when it is absent, malformed or off the board.
    pub fn square(&self) -> Option<Coord> {
        let row = self.row.as_deref()?.trim().parse().ok()?;
        let col = self.col.as_deref()?.trim().parse().ok()?;
        Coord::from_signed(row, col)
    }
}

/// Game id from the path. Anything that is not a UUID is an unknown game.
pub struct GameId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for GameId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadGameId(rejection.body_text()))?;
        Uuid::parse_str(&raw)
            .map(GameId)
            .map_err(|_| ApiError::BadGameId(raw))
    }
}

#[derive(Debug, Serialize)]
pub struct MovesResponse {
    pub from: Option<Coord>,
    pub moves: Vec<Coord>,
}

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let index = static_dir.join("index.html");

    let api = Router::new()
        .route("/health", get(health))
        .route("/games", post(create_game))
        .route("/games/:id", get(get_game).delete(delete_game))
        .route("/games/:id/moves", get(legal_moves).post(post_move))
        .fallback(api_not_found);

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "chess-ai" }))
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

async fn create_game(State(app): State<AppState>) -> (StatusCode, Json<GameSnapshot>) {
    let id = Uuid::new_v4();
    let mut sessions = app.sessions.lock().await;
    let session = sessions.entry(id).or_insert_with(|| {
        GameSession::new(id, app.config.agent_color, Box::new(RandomAgent::new()))
    });
    // Agent playing white moves first
    schedule_agent_move(&app, session);
    tracing::info!(game = %id, agent_color = %app.config.agent_color, "game created");
    (StatusCode::CREATED, Json(session.snapshot()))
}

async fn get_game(
    State(app): State<AppState>,
    GameId(id): GameId,
) -> Result<Json<GameSnapshot>, ApiError> {
    let sessions = app.sessions.lock().await;
    let session = sessions.get(&id).ok_or(ApiError::GameNotFound(id))?;
    Ok(Json(session.snapshot()))
}

async fn delete_game(
    State(app): State<AppState>,
    GameId(id): GameId,
) -> Result<StatusCode, ApiError> {
    // Dropping the session aborts any pending agent move
    let removed = app.sessions.lock().await.remove(&id);
    match removed {
        Some(_) => {
            tracing::info!(game = %id, "game deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::GameNotFound(id)),
    }
}

async fn legal_moves(
    State(app): State<AppState>,
    GameId(id): GameId,
    query: Option<Query<MovesQuery>>,
) -> Result<Json<MovesResponse>, ApiError> {
    let sessions = app.sessions.lock().await;
    let session = sessions.get(&id).ok_or(ApiError::GameNotFound(id))?;
    let from = query.and_then(|Query(q)| q.square());
    let moves = from
        .map(|sq| session.state.legal_moves_from(sq))
        .unwrap_or_default();
    Ok(Json(MovesResponse { from, moves }))
}

async fn post_move(
    State(app): State<AppState>,
    GameId(id): GameId,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let Json(req) = body?;
    let mut sessions = app.sessions.lock().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::GameNotFound(id))?;
    let mv = Move::new(req.from, req.to);
    session.human_move(mv)?;
    tracing::debug!(game = %id, %mv, "human moved");
    schedule_agent_move(&app, session);
    Ok(Json(session.snapshot()))
}
