use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use notes_core::services::DatabaseService;
use notes_core::{Note, NoteChanges, NoteDraft, NoteId};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    db: DatabaseService,
}

impl AppState {
    pub const fn new(config: Arc<AppConfig>, db: DatabaseService) -> Self {
        Self { config, db }
    }
}

pub fn app_router(state: AppState) -> Router {
    let note_routes = Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        );

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", note_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Malformed ids can never match a stored note.
fn parse_note_id(raw: &str) -> Result<NoteId, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, AppError> {
    let notes = state
        .db
        .list_notes()
        .await
        .map_err(|error| AppError::storage("Error fetching notes", error))?;
    Ok(Json(notes))
}

async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, AppError> {
    let id = parse_note_id(&id)?;
    let note = state
        .db
        .get_note(&id)
        .await
        .map_err(|error| AppError::storage("Error fetching note", error))?
        .ok_or(AppError::NotFound)?;
    Ok(Json(note))
}

async fn create_note(
    State(state): State<AppState>,
    Json(draft): Json<NoteDraft>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let note = state
        .db
        .create_note(&draft)
        .await
        .map_err(|error| AppError::storage("Error creating note", error))?;
    tracing::info!(note_id = %note.id, "Created note");
    Ok((StatusCode::CREATED, Json(note)))
}

async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<NoteChanges>,
) -> Result<Json<Note>, AppError> {
    let id = parse_note_id(&id)?;
    let note = state
        .db
        .update_note(&id, &changes)
        .await
        .map_err(|error| AppError::storage("Error updating note", error))?;
    tracing::info!(note_id = %note.id, "Updated note");
    Ok(Json(note))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_note_id(&id)?;
    state
        .db
        .delete_note(&id)
        .await
        .map_err(|error| AppError::storage("Error deleting note", error))?;
    tracing::info!(note_id = %id, "Deleted note");
    Ok(Json(MessageResponse {
        message: "Note deleted successfully",
    }))
}
