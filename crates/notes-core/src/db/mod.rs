//! Database layer for Notes

mod connection;
mod migrations;
mod repository;

pub use connection::{Database, RemoteConfig};
pub use repository::{LibSqlNoteRepository, NoteRepository};
