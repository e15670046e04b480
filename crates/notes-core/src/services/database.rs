//! Shared database service wrapper used by the API server.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{Database, LibSqlNoteRepository, NoteRepository, RemoteConfig};
use crate::models::{Note, NoteChanges, NoteDraft};
use crate::{NoteId, Result};

/// Where the service keeps its notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// A local `SQLite` file, created on first open
    Local(PathBuf),
    /// A throwaway in-memory database
    InMemory,
    /// A remote libSQL server
    Remote(RemoteConfig),
}

/// Thread-safe service for DB and repository operations.
#[derive(Clone)]
pub struct DatabaseService {
    db: Arc<Mutex<Database>>,
}

impl DatabaseService {
    /// Open the database described by `target`.
    pub async fn open(target: &DatabaseTarget) -> Result<Self> {
        let db = match target {
            DatabaseTarget::Local(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                tracing::info!("Opening local database at {}", path.display());
                Database::open(path).await?
            }
            DatabaseTarget::InMemory => {
                tracing::info!("Opening in-memory database");
                Database::open_in_memory().await?
            }
            DatabaseTarget::Remote(config) => {
                tracing::info!("Opening remote database at {}", config.url);
                Database::open_remote(config).await?
            }
        };
        tracing::info!(remote = db.is_remote(), "Database ready");

        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Open an in-memory database service (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        Self::open(&DatabaseTarget::InMemory).await
    }

    /// List all notes, most recently updated first.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let db = self.db.lock().await;
        let repo = LibSqlNoteRepository::new(db.connection());
        repo.list().await
    }

    /// Fetch a note by id.
    pub async fn get_note(&self, id: &NoteId) -> Result<Option<Note>> {
        let db = self.db.lock().await;
        let repo = LibSqlNoteRepository::new(db.connection());
        repo.get(id).await
    }

    /// Create a new note.
    pub async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        let db = self.db.lock().await;
        let repo = LibSqlNoteRepository::new(db.connection());
        repo.create(draft).await
    }

    /// Apply partial changes to a note.
    pub async fn update_note(&self, id: &NoteId, changes: &NoteChanges) -> Result<Note> {
        let db = self.db.lock().await;
        let repo = LibSqlNoteRepository::new(db.connection());
        repo.update(id, changes).await
    }

    /// Permanently delete a note.
    pub async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlNoteRepository::new(db.connection());
        repo.delete(id).await
    }
}
