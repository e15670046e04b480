//! Note repository implementation

use crate::error::{Error, Result};
use crate::models::{Note, NoteChanges, NoteDraft, NoteId};
use crate::util::unix_millis_now;
use libsql::{params, Connection, Row, Value};

const NOTE_COLUMNS: &str = "id, title, content, category, created_at, updated_at";

/// Trait for note storage operations (async)
#[allow(async_fn_in_trait)]
pub trait NoteRepository {
    /// Create a new note
    async fn create(&self, draft: &NoteDraft) -> Result<Note>;

    /// Get a note by ID
    async fn get(&self, id: &NoteId) -> Result<Option<Note>>;

    /// List every note, most recently updated first
    async fn list(&self) -> Result<Vec<Note>>;

    /// Replace the fields present in `changes` and bump `updated_at`
    async fn update(&self, id: &NoteId, changes: &NoteChanges) -> Result<Note>;

    /// Permanently delete a note
    async fn delete(&self, id: &NoteId) -> Result<()>;
}

/// libSQL implementation of `NoteRepository`
pub struct LibSqlNoteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlNoteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a note from a database row
    fn parse_note(row: &Row) -> Result<Note> {
        let id: String = row.get(0)?;
        let id = id
            .parse()
            .map_err(|_| Error::Database(format!("Stored note has invalid id '{id}'")))?;
        Ok(Note {
            id,
            title: row.get(1)?,
            content: row.get(2)?,
            category: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

fn optional_text(value: Option<&String>) -> Value {
    value.map_or(Value::Null, |text| Value::Text(text.clone()))
}

impl NoteRepository for LibSqlNoteRepository<'_> {
    async fn create(&self, draft: &NoteDraft) -> Result<Note> {
        let note = Note::from_draft(draft.clone(), unix_millis_now());

        self.conn
            .execute(
                "INSERT INTO notes (id, title, content, category, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    note.id.as_str(),
                    note.title.clone(),
                    note.content.clone(),
                    note.category.clone(),
                    note.created_at,
                    note.updated_at
                ],
            )
            .await?;

        Ok(note)
    }

    async fn get(&self, id: &NoteId) -> Result<Option<Note>> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
                params![id.as_str()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_note(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {NOTE_COLUMNS} FROM notes
                     ORDER BY updated_at DESC, created_at DESC"
                ),
                (),
            )
            .await?;

        let mut notes = Vec::new();
        while let Some(row) = rows.next().await? {
            notes.push(Self::parse_note(&row)?);
        }
        Ok(notes)
    }

    async fn update(&self, id: &NoteId, changes: &NoteChanges) -> Result<Note> {
        // updated_at strictly increases even when two writes share a millisecond.
        let rows = self
            .conn
            .execute(
                "UPDATE notes SET
                    title = COALESCE(?1, title),
                    content = COALESCE(?2, content),
                    category = COALESCE(?3, category),
                    updated_at = MAX(?4, updated_at + 1)
                 WHERE id = ?5",
                params![
                    optional_text(changes.title.as_ref()),
                    optional_text(changes.content.as_ref()),
                    optional_text(changes.category.as_ref()),
                    unix_millis_now(),
                    id.as_str()
                ],
            )
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        self.get(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &NoteId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id.as_str()])
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }
}
