use chrono::{Local, NaiveDateTime};
use log::{debug, warn};
use rusqlite::{params, Row};

use super::{Database, StoreError, StoreResult};
use crate::models::{Note, SortKey, TIMESTAMP_FORMAT};

const NOTE_COLUMNS: &str = "id, title, text, created_time, updated_time";

/// Outcome of `Database::upsert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upsert {
    Created(Note),
    Updated(Note),
}

impl Upsert {
    pub fn note(&self) -> &Note {
        match self {
            Upsert::Created(note) | Upsert::Updated(note) => note,
        }
    }
}

/// Helper to convert timestamp parse errors to rusqlite errors
fn parse_timestamp(idx: usize, s: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn format_timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Map a UNIQUE violation on `title` to `DuplicateTitle`
fn map_write_error(err: rusqlite::Error, title: &str) -> StoreError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        if e.code == rusqlite::ErrorCode::ConstraintViolation {
            return StoreError::DuplicateTitle(title.to_string());
        }
    }
    err.into()
}

impl Database {
    // ==================== LOOKUP ====================

    /// Resolve an identifier to a note id.
    ///
    /// An exact title match wins. Otherwise the identifier is compared with
    /// the id column, so a note titled "7" shadows the note whose id is 7.
    ///
    /// The id comparison binds the raw text and lets SQLite apply the
    /// column's INTEGER affinity: "01" and "1.0" both name id 1, while
    /// non-numeric text never matches.
    pub fn resolve(&self, identifier: &str) -> StoreResult<Option<i64>> {
        if let Some(id) = self.query_id("SELECT id FROM notes WHERE title = ?", identifier)? {
            return Ok(Some(id));
        }

        self.query_id("SELECT id FROM notes WHERE id = ?", identifier)
    }

    pub fn exists(&self, identifier: &str) -> StoreResult<bool> {
        Ok(self.resolve(identifier)?.is_some())
    }

    /// True if `title` belongs to a note other than `except_id`
    pub fn title_taken(&self, title: &str, except_id: Option<i64>) -> StoreResult<bool> {
        let owner = self.query_id("SELECT id FROM notes WHERE title = ?", title)?;
        Ok(match (owner, except_id) {
            (Some(owner), Some(except)) => owner != except,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }

    pub fn get_note(&self, identifier: &str) -> StoreResult<Option<Note>> {
        match self.resolve(identifier)? {
            Some(id) => self.get_note_by_id(id),
            None => Ok(None),
        }
    }

    pub fn get_note_by_id(&self, id: i64) -> StoreResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM notes WHERE id = ?", NOTE_COLUMNS))?;

        let result = stmt.query_row([id], Self::row_to_note);

        match result {
            Ok(note) => Ok(Some(note)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_text(&self, identifier: &str) -> StoreResult<Option<String>> {
        Ok(self.get_note(identifier)?.map(|note| note.text))
    }

    pub fn get_title(&self, identifier: &str) -> StoreResult<Option<String>> {
        Ok(self.get_note(identifier)?.map(|note| note.title))
    }

    /// All notes in ascending order of `key`, ties broken by id
    pub fn list_all(&self, key: SortKey) -> StoreResult<Vec<Note>> {
        // Column comes from a closed enum, never from user text
        let sql = format!(
            "SELECT {} FROM notes ORDER BY {} ASC, id ASC",
            NOTE_COLUMNS,
            key.to_sql_column()
        );

        let mut stmt = self.conn.prepare(&sql)?;

        let notes = stmt
            .query_map([], Self::row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    // ==================== WRITE ====================

    /// Create or update the note named by `identifier`, stamped with the local time
    pub fn upsert(
        &self,
        identifier: &str,
        text: &str,
        new_title: Option<&str>,
    ) -> StoreResult<Upsert> {
        self.upsert_at(identifier, text, new_title, Local::now().naive_local())
    }

    /// Create or update with an explicit timestamp.
    ///
    /// An existing note keeps its id and `created_time`; its title changes only
    /// when `new_title` is given. A missing note is created with
    /// `title = identifier` and `new_title` is ignored.
    pub fn upsert_at(
        &self,
        identifier: &str,
        text: &str,
        new_title: Option<&str>,
        now: NaiveDateTime,
    ) -> StoreResult<Upsert> {
        let stamp = format_timestamp(now);

        match self.resolve(identifier)? {
            Some(id) => {
                if let Some(title) = new_title {
                    if self.title_taken(title, Some(id))? {
                        warn!("rejected rename of note {} to duplicate title", id);
                        return Err(StoreError::DuplicateTitle(title.to_string()));
                    }
                }

                // MAX keeps updated_time from falling behind created_time
                self.conn
                    .execute(
                        r#"UPDATE notes
                           SET text = ?1,
                               updated_time = MAX(?2, created_time),
                               title = COALESCE(?3, title)
                           WHERE id = ?4"#,
                        params![text, stamp, new_title, id],
                    )
                    .map_err(|e| map_write_error(e, new_title.unwrap_or(identifier)))?;
                debug!("updated note {}", id);

                let note = self
                    .get_note_by_id(id)?
                    .ok_or(StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows))?;
                Ok(Upsert::Updated(note))
            }
            None => {
                self.conn
                    .execute(
                        r#"INSERT INTO notes (title, text, created_time, updated_time)
                           VALUES (?1, ?2, ?3, ?3)"#,
                        params![identifier, text, stamp],
                    )
                    .map_err(|e| map_write_error(e, identifier))?;

                let id = self.conn.last_insert_rowid();
                debug!("created note {}", id);

                Ok(Upsert::Created(Note {
                    id,
                    title: identifier.to_string(),
                    text: text.to_string(),
                    created_time: parse_timestamp(3, &stamp)?,
                    updated_time: parse_timestamp(4, &stamp)?,
                }))
            }
        }
    }

    /// Delete the note named by `identifier`. Returns the number of rows removed.
    pub fn delete(&self, identifier: &str) -> StoreResult<usize> {
        let Some(id) = self.resolve(identifier)? else {
            return Ok(0);
        };

        let rows = self.conn.execute("DELETE FROM notes WHERE id = ?", [id])?;
        debug!("deleted note {}", id);
        Ok(rows)
    }

    // ==================== HELPERS ====================

    fn query_id(&self, sql: &str, param: impl rusqlite::ToSql) -> StoreResult<Option<i64>> {
        let result = self.conn.query_row(sql, [param], |row| row.get(0));

        match result {
            Ok(id) => Ok(Some(id)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
        let created: String = row.get(3)?;
        let updated: String = row.get(4)?;

        Ok(Note {
            id: row.get(0)?,
            title: row.get(1)?,
            text: row.get(2)?,
            created_time: parse_timestamp(3, &created)?,
            updated_time: parse_timestamp(4, &updated)?,
        })
    }
}
