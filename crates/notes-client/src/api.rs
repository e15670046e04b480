//! HTTP access to the Notes API.

use std::future::Future;

use notes_core::util::{is_http_url, normalize_text_option};
use notes_core::{Note, NoteChanges, NoteDraft, NoteId};
use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";

/// The five note operations the views depend on.
///
/// Futures are `Send` so the editor can run saves on spawned tasks.
pub trait NotesApi: Send + Sync + 'static {
    /// All notes, most recently updated first
    fn list_notes(&self) -> impl Future<Output = Result<Vec<Note>>> + Send;

    /// A single note
    fn get_note(&self, id: &NoteId) -> impl Future<Output = Result<Note>> + Send;

    /// Create a note from a complete draft
    fn create_note(&self, draft: &NoteDraft) -> impl Future<Output = Result<Note>> + Send;

    /// Replace the fields present in `changes`
    fn update_note(
        &self,
        id: &NoteId,
        changes: &NoteChanges,
    ) -> impl Future<Output = Result<Note>> + Send;

    /// Permanently delete a note
    fn delete_note(&self, id: &NoteId) -> impl Future<Output = Result<()>> + Send;
}

/// `reqwest`-backed client for a running `notes-api`
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpNotesApi {
    /// Build a client rooted at `base_url` (e.g. `http://localhost:5001/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.into())?;
        Ok(Self {
            base_url,
            client: reqwest::Client::builder().build()?,
        })
    }

    /// Client rooted at `NOTES_API_URL`, falling back to [`DEFAULT_API_URL`].
    pub fn from_env() -> Result<Self> {
        let base_url = normalize_text_option(std::env::var("NOTES_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: &NoteId) -> String {
        format!("{}/notes/{id}", self.base_url)
    }
}

impl NotesApi for HttpNotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let response = self.client.get(self.notes_url()).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn get_note(&self, id: &NoteId) -> Result<Note> {
        let response = self.client.get(self.note_url(id)).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        let response = self
            .client
            .post(self.notes_url())
            .json(draft)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn update_note(&self, id: &NoteId, changes: &NoteChanges) -> Result<Note> {
        let response = self
            .client
            .put(self.note_url(id))
            .json(changes)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let response = self.client.delete(self.note_url(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        message: parse_api_error(&body),
    })
}

fn parse_api_error(body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return message.trim().to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.chars().take(180).collect()
    }
}

fn normalize_base_url(raw: String) -> Result<String> {
    let url = normalize_text_option(Some(raw))
        .ok_or_else(|| ClientError::InvalidUrl("API URL must not be empty".to_string()))?;
    if is_http_url(&url) {
        Ok(url.trim_end_matches('/').to_string())
    } else {
        Err(ClientError::InvalidUrl(format!(
            "{url} must include http:// or https://"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url(String::new()).is_err());
        assert!(normalize_base_url("localhost:5001/api".to_string()).is_err());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpNotesApi::new(" http://localhost:5001/api/ ").unwrap();
        assert_eq!(api.base_url(), "http://localhost:5001/api");

        let id = NoteId::new();
        assert_eq!(api.notes_url(), "http://localhost:5001/api/notes");
        assert_eq!(
            api.note_url(&id),
            format!("http://localhost:5001/api/notes/{id}")
        );
    }

    #[test]
    fn parse_api_error_prefers_message_field() {
        assert_eq!(
            parse_api_error(r#"{"message":" Error creating note "}"#),
            "Error creating note"
        );
        assert_eq!(parse_api_error(r#"{"error":"boom"}"#), "boom");
        assert_eq!(parse_api_error("   "), "no response body");
        assert_eq!(parse_api_error("Bad Gateway"), "Bad Gateway");
    }
}
