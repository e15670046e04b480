//! Data models for Notes

mod category;
mod note;

pub use category::{Category, ParseCategoryError};
pub use note::{default_title_at, Note, NoteChanges, NoteDraft, NoteId};
