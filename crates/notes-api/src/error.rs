use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Note not found")]
    NotFound,
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: notes_core::Error,
    },
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl AppError {
    /// Map a repository failure, turning missing rows into `NotFound`.
    ///
    /// `context` is the only text the caller sees; the cause is logged.
    pub fn storage(context: &'static str, source: notes_core::Error) -> Self {
        if source.is_not_found() {
            return Self::NotFound;
        }
        tracing::error!("{context}: {source}");
        Self::Storage { context, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
