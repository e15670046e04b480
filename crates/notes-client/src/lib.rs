//! notes-client - headless client for the Notes API
//!
//! [`NoteListView`] and [`EditorSession`] hold the state a front end renders
//! and expose the user actions as methods. Network failures are logged and
//! swallowed, leaving prior state untouched.

pub mod api;
pub mod editor;
pub mod error;
pub mod keys;
pub mod list_view;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

pub use api::{HttpNotesApi, NotesApi, DEFAULT_API_URL};
pub use editor::{
    EditorPhase, EditorSession, ExitOutcome, KeyOutcome, DEFAULT_DEBOUNCE, EDITOR_PATH, HOME_PATH,
};
pub use error::{ClientError, Result};
pub use keys::{EditorKeyAction, Field, Key, Modifiers};
pub use list_view::{CaptureDraft, CategoryFilter, NoteListView};
