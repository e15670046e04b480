//! Shared service layer.

mod database;

pub use database::{DatabaseService, DatabaseTarget};
