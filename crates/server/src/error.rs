use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chess_core::MoveError;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Every failure an API route can report. All of them answer `{"error": ..}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("game {0} not found")]
    GameNotFound(Uuid),
    /// Path segment that is not a game id at all
    #[error("game {0} not found")]
    BadGameId(String),
    #[error("it is the agent's turn")]
    AgentTurn,
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::GameNotFound(_) | ApiError::BadGameId(_) => StatusCode::NOT_FOUND,
            ApiError::AgentTurn | ApiError::Move(MoveError::GameOver) => StatusCode::CONFLICT,
            ApiError::Move(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Body(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
