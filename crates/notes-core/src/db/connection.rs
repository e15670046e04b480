//! Database connection management

use crate::error::{Error, Result};
use libsql::{Builder, Connection, Database as LibSqlDatabase};
use std::fmt;
use std::path::Path;

use super::migrations;

/// Connection details for a remote libSQL database
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Remote database URL (e.g., `libsql://your-db.turso.io`)
    pub url: String,
    /// Authentication token for remote database
    pub auth_token: String,
}

impl RemoteConfig {
    /// Create a new remote configuration
    pub fn new(url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: auth_token.into(),
        }
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field("auth_token", &"[REDACTED]")
            .finish()
    }
}

/// Database wrapper for libSQL connections
pub struct Database {
    // Keeps the handle alive for as long as `conn` is in use.
    _db: LibSqlDatabase,
    conn: Connection,
    remote: bool,
}

impl Database {
    /// Open a local database at the given path, creating it if it doesn't exist
    ///
    /// Runs migrations automatically.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let db = Builder::new_local(&path_str).build().await?;
        Self::finish(db, false).await
    }

    /// Open an in-memory database (useful for testing)
    pub async fn open_in_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        Self::finish(db, false).await
    }

    /// Open a remote database; every statement goes over the network.
    pub async fn open_remote(config: &RemoteConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(Error::InvalidInput("Remote database URL is required".into()));
        }
        if config.auth_token.trim().is_empty() {
            return Err(Error::InvalidInput("Auth token is required".into()));
        }

        let db = Builder::new_remote(config.url.clone(), config.auth_token.clone())
            .build()
            .await?;
        Self::finish(db, true).await
    }

    async fn finish(db: LibSqlDatabase, remote: bool) -> Result<Self> {
        let conn = db.connect()?;
        let database = Self {
            _db: db,
            conn,
            remote,
        };
        database.configure().await?;
        database.migrate().await?;
        Ok(database)
    }

    /// Configure `SQLite` for local files; remote databases manage their own pragmas
    async fn configure(&self) -> Result<()> {
        if self.remote {
            return Ok(());
        }
        self.conn
            .execute("PRAGMA journal_mode = WAL;", ())
            .await
            .ok(); // In-memory databases refuse WAL
        self.conn
            .execute("PRAGMA synchronous = NORMAL;", ())
            .await
            .ok();
        Ok(())
    }

    /// Run database migrations
    async fn migrate(&self) -> Result<()> {
        migrations::run(&self.conn).await
    }

    /// Check whether this database lives on a remote server
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
