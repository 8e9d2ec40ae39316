//! Raw record reads and writes.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_RECORD_SQL: &str = "SELECT value, updated_at FROM storage WHERE key = ?1";
const UPSERT_RECORD_SQL: &str = "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_RECORD_SQL: &str = "DELETE FROM storage WHERE key = ?1";

/// A stored value together with the time it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Raw stored text, not validated
    pub value: String,
    /// When the value was last written (UTC)
    pub updated_at: Timestamp,
}

impl super::Database {
    /// Reads the record stored under `key`.
    pub fn get_record(&self, key: &str) -> Result<Option<StoredRecord>> {
        self.connection
            .query_row(SELECT_RECORD_SQL, params![key], |row| {
                Ok(StoredRecord {
                    value: row.get(0)?,
                    updated_at: row.get::<_, String>(1)?.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                    })?,
                })
            })
            .optional()
            .db_context("Failed to read stored record")
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub fn put_record(&mut self, key: &str, value: &str) -> Result<Timestamp> {
        let now = Timestamp::now();
        self.connection
            .execute(UPSERT_RECORD_SQL, params![key, value, now.to_string()])
            .db_context("Failed to write stored record")?;
        Ok(now)
    }

    /// Removes the record stored under `key`. Returns true if one existed.
    pub fn delete_record(&mut self, key: &str) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_RECORD_SQL, params![key])
            .db_context("Failed to delete stored record")?;
        Ok(removed > 0)
    }
}
