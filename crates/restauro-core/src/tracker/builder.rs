//! Builder for creating and configuring Tracker instances.

use std::path::{Path, PathBuf};

use log::info;

use super::{ProgressStore, Tracker, WorkflowState};
use crate::{
    error::{RestauroError, Result},
    models::Step,
    template::{initial_workflow, STORAGE_KEY},
};

/// Builder for creating and configuring Tracker instances.
#[derive(Debug, Clone)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    template: Option<Vec<Step>>,
    storage_key: String,
}

impl TrackerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            template: None,
            storage_key: STORAGE_KEY.to_string(),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/restauro/restauro.db` or
    /// `~/.local/share/restauro/restauro.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Replaces the bundled workflow template.
    pub fn with_template(mut self, template: Vec<Step>) -> Self {
        self.template = Some(template);
        self
    }

    /// Overrides the key the snapshot is stored under.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Loads stored progress and builds the tracker.
    ///
    /// # Errors
    ///
    /// Returns `RestauroError::FileSystem` if the database directory cannot be
    /// created, or `RestauroError::XdgDirectory` if no default location exists.
    /// A missing or corrupt record is not an error.
    pub async fn build(self) -> Result<Tracker> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| RestauroError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = ProgressStore::new(db_path, self.storage_key);
        let saved = store.load().await;
        let template = self.template.unwrap_or_else(initial_workflow);

        let (state, last_saved) = match saved {
            Some(saved) => (
                WorkflowState::from_snapshot(template, Some(&saved.snapshot)),
                Some(saved.saved_at),
            ),
            None => (WorkflowState::from_template(template), None),
        };

        info!(
            "Loaded workflow from {} ({}% complete)",
            store.database_path().display(),
            state.progress().percent
        );

        Ok(Tracker::new(state, store, last_saved))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("restauro")
            .place_data_file("restauro.db")
            .map_err(|e| RestauroError::XdgDirectory(e.to_string()))
    }
}

impl Default for TrackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
