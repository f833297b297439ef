use log::info;
use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

mod notes;
mod schema;

pub use notes::Upsert;
pub use schema::SCHEMA_VERSION;

/// Database file, created in the working directory if absent
pub const DB_FILE: &str = "notes.db";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a note titled '{0}' already exists")]
    DuplicateTitle(String),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open `notes.db` in the working directory, creating it if needed
    pub fn open() -> StoreResult<Self> {
        Self::open_at(DB_FILE)
    }

    pub fn open_at(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!("opened note store at {}", path.display());

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open in-memory database for testing
    pub fn open_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    #[allow(dead_code)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Release the connection, surfacing any error from closing it
    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))?;
        info!("closed note store");
        Ok(())
    }

    fn migrate(&self) -> StoreResult<()> {
        let version = self.get_schema_version()?;

        if version == 0 {
            self.conn
                .execute_batch(&format!("BEGIN TRANSACTION; {} COMMIT;", schema::SCHEMA_V1))?;
            self.set_schema_version(SCHEMA_VERSION)?;
        }

        Ok(())
    }

    fn get_schema_version(&self) -> StoreResult<i32> {
        let version = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(version)
    }

    fn set_schema_version(&self, version: i32) -> StoreResult<()> {
        // PRAGMA does not accept bound parameters
        self.conn
            .execute_batch(&format!("PRAGMA user_version = {};", version))?;
        Ok(())
    }
}
