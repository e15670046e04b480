//! In-memory `NotesApi` that records every call.
//!
//! Built for this crate's tests and, with the `test-util` feature, for
//! downstream crates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use notes_core::{Note, NoteChanges, NoteDraft, NoteId};

use crate::api::NotesApi;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get(NoteId),
    Create(NoteDraft),
    Update(NoteId, NoteChanges),
    Delete(NoteId),
}

#[derive(Default)]
pub struct FakeApi {
    notes: Mutex<Vec<Note>>,
    calls: Mutex<Vec<Call>>,
    offline: AtomicBool,
    clock: Mutex<i64>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FakeApi {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let fake = Self::default();
        *lock(&fake.notes) = notes;
        fake
    }

    /// Make every following call fail like an unreachable server.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn creates(&self) -> Vec<NoteDraft> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create(draft) => Some(draft),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<(NoteId, NoteChanges)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update(id, changes) => Some((id, changes)),
                _ => None,
            })
            .collect()
    }

    pub fn stored(&self) -> Vec<Note> {
        lock(&self.notes).clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        lock(&self.calls).push(call);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: 503,
                message: "offline".to_string(),
            });
        }
        Ok(())
    }

    fn tick(&self) -> i64 {
        let mut clock = lock(&self.clock);
        *clock += 10;
        *clock
    }
}

/// A stored note with fixed timestamps, for seeding fakes.
pub fn note(title: &str, category: &str, updated_at: i64) -> Note {
    Note {
        id: NoteId::new(),
        title: title.to_string(),
        content: format!("{title} content"),
        category: category.to_string(),
        created_at: updated_at,
        updated_at,
    }
}

impl NotesApi for FakeApi {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.record(Call::List)?;
        let mut notes = self.stored();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    async fn get_note(&self, id: &NoteId) -> Result<Note> {
        self.record(Call::Get(*id))?;
        lock(&self.notes)
            .iter()
            .find(|note| note.id == *id)
            .cloned()
            .ok_or(ClientError::NotFound)
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        self.record(Call::Create(draft.clone()))?;
        let note = Note::from_draft(draft.clone(), self.tick());
        lock(&self.notes).push(note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: &NoteId, changes: &NoteChanges) -> Result<Note> {
        self.record(Call::Update(*id, changes.clone()))?;
        let now = self.tick();
        let mut notes = lock(&self.notes);
        let note = notes
            .iter_mut()
            .find(|note| note.id == *id)
            .ok_or(ClientError::NotFound)?;
        note.apply(changes);
        note.updated_at = now;
        Ok(note.clone())
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.record(Call::Delete(*id))?;
        let mut notes = lock(&self.notes);
        let before = notes.len();
        notes.retain(|note| note.id != *id);
        if notes.len() == before {
            return Err(ClientError::NotFound);
        }
        Ok(())
    }
}
