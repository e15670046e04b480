//! notes-core - Core library for Notes
//!
//! This crate contains the note model, the database layer, and the shared
//! database service used by the API server.

pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod util;

pub use error::{Error, Result};
pub use models::{Category, Note, NoteChanges, NoteDraft, NoteId};
