//! SQLite-backed key/value storage.
//!
//! The application keeps a single serialized record per key, the same way a
//! browser keeps values in local storage. This module owns the connection,
//! the schema and the raw record queries; interpretation of the stored text
//! happens in [`crate::snapshot`].

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod record_queries;

pub use record_queries::StoredRecord;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
