//! Owned workflow state with write-through persistence.
//!
//! [`Tracker`] is the single owner of the live checklist. It is built once by
//! [`TrackerBuilder`], which reads the stored snapshot and reconciles it onto
//! the template. Every mutation is applied in memory first and then written
//! back through the [`ProgressStore`], in the order the calls were made.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Template     │    │  WorkflowState  │    │  ProgressStore  │
//! │ (template.rs)   │───▶│ (reconciled)    │───▶│   (SQLite kv)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage Examples
//!
//! ```rust
//! use restauro_core::TrackerBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tracker = TrackerBuilder::new()
//!     .with_database_path(Some("restauro.db"))
//!     .build()
//!     .await?;
//!
//! tracker.toggle_task("step1", "dl_script").await?;
//! println!("{}", tracker.progress());
//! # Ok(())
//! # }
//! ```

use jiff::Timestamp;

pub mod builder;
pub mod state;
pub mod store;


pub use builder::TrackerBuilder;
pub use state::WorkflowState;
pub use store::{ProgressStore, SavedProgress};

use crate::{
    error::Result,
    models::{Progress, Step, Task},
};

/// Workflow state plus the store it is persisted to.
pub struct Tracker {
    state: WorkflowState,
    store: ProgressStore,
    last_saved: Option<Timestamp>,
}

impl Tracker {
    pub(crate) fn new(state: WorkflowState, store: ProgressStore, last_saved: Option<Timestamp>) -> Self {
        Self {
            state,
            store,
            last_saved,
        }
    }

    /// Read access to the live state.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Current steps in template order.
    pub fn steps(&self) -> &[Step] {
        self.state.steps()
    }

    /// Aggregated progress.
    pub fn progress(&self) -> Progress {
        self.state.progress()
    }

    /// When progress was last written, if ever.
    pub fn last_saved(&self) -> Option<Timestamp> {
        self.last_saved
    }

    /// The backing store.
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// Flips a task and persists the new state.
    ///
    /// If the save fails the flip is undone, so memory keeps matching the
    /// stored record.
    pub async fn toggle_task(&mut self, step_id: &str, task_id: &str) -> Result<Task> {
        let task = self.state.toggle(step_id, task_id)?.clone();
        if let Err(e) = self.persist().await {
            self.state.set_done(step_id, task_id, !task.done)?;
            return Err(e);
        }
        Ok(task)
    }

    /// Sets a task's flag explicitly.
    ///
    /// Persists only when the flag actually changed, and reports whether it
    /// did. A failed save restores the previous flag.
    pub async fn set_task_done(
        &mut self,
        step_id: &str,
        task_id: &str,
        done: bool,
    ) -> Result<(Task, bool)> {
        let (task, changed) = self.state.set_done(step_id, task_id, done)?;
        let task = task.clone();
        if changed {
            if let Err(e) = self.persist().await {
                self.state.set_done(step_id, task_id, !done)?;
                return Err(e);
            }
        }
        Ok((task, changed))
    }

    /// Clears stored progress and restores template defaults.
    pub async fn reset(&mut self) -> Result<()> {
        self.store.clear().await?;
        self.state.reset();
        self.last_saved = None;
        Ok(())
    }

    async fn persist(&mut self) -> Result<()> {
        let saved_at = self.store.save(self.state.steps()).await?;
        self.last_saved = Some(saved_at);
        Ok(())
    }
}
