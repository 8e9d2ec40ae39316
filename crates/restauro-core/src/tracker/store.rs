//! Persistence gateway for workflow progress.

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use log::{debug, warn};
use tokio::task;

use crate::{
    db::{Database, StoredRecord},
    error::{RestauroError, Result},
    models::Step,
    snapshot::{parse_snapshot, PersistedSnapshot, StoredSnapshot},
};

/// Progress read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedProgress {
    /// Validated snapshot
    pub snapshot: PersistedSnapshot,
    /// When it was written
    pub saved_at: Timestamp,
}

/// Reads and writes the single serialized progress record.
///
/// Loading never fails: a missing record, an unreadable database and a
/// corrupt value all come back as `None`. A corrupt value is also deleted so
/// it is not reprocessed on the next start.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    db_path: PathBuf,
    key: String,
}

impl ProgressStore {
    /// Creates a store for `key` inside the database at `db_path`.
    pub fn new(db_path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            key: key.into(),
        }
    }

    /// Path of the backing database.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Loads the stored snapshot, discarding it if it is corrupt.
    pub async fn load(&self) -> Option<SavedProgress> {
        let record = match self.read_record().await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("No stored progress under '{}'", self.key);
                return None;
            }
            Err(e) => {
                warn!("Could not read stored progress, starting fresh: {e}");
                return None;
            }
        };

        match parse_snapshot(&record.value) {
            StoredSnapshot::Valid(snapshot) => Some(SavedProgress {
                snapshot,
                saved_at: record.updated_at,
            }),
            StoredSnapshot::Missing => None,
            StoredSnapshot::Invalid { reason } => {
                warn!("Storage corruption detected ({reason}). Resetting to default state.");
                if let Err(e) = self.clear().await {
                    warn!("Failed to discard corrupt progress record: {e}");
                }
                None
            }
        }
    }

    /// Serializes the full workflow state and overwrites the stored record.
    pub async fn save(&self, steps: &[Step]) -> Result<Timestamp> {
        let value = serde_json::to_string(steps)?;
        self.write_raw(value).await
    }

    /// Removes the stored record.
    pub async fn clear(&self) -> Result<()> {
        let db_path = self.db_path.clone();
        let key = self.key.clone();

        let removed = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_record(&key)
        })
        .await
        .map_err(RestauroError::join)??;

        debug!("Cleared progress record '{}' (existed: {removed})", self.key);
        Ok(())
    }

    /// Returns the stored text exactly as written, without validation.
    pub async fn read_raw(&self) -> Result<Option<String>> {
        Ok(self.read_record().await?.map(|record| record.value))
    }

    /// Writes arbitrary text under the store's key, without validation.
    pub async fn write_raw(&self, value: String) -> Result<Timestamp> {
        let db_path = self.db_path.clone();
        let key = self.key.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.put_record(&key, &value)
        })
        .await
        .map_err(RestauroError::join)?
    }

    async fn read_record(&self) -> Result<Option<StoredRecord>> {
        let db_path = self.db_path.clone();
        let key = self.key.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_record(&key)
        })
        .await
        .map_err(RestauroError::join)?
    }
}
