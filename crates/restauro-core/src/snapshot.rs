//! Persisted progress snapshots and their reconciliation onto the template.
//!
//! The stored record is untrusted. [`parse_snapshot`] turns raw text into a
//! [`StoredSnapshot`], and only the [`StoredSnapshot::Valid`] variant is ever
//! merged. [`reconcile`] keeps the template authoritative: the result always
//! has exactly the template's steps, tasks and order, and only the `done`
//! flags are taken from the snapshot.

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::models::Step;

/// A task entry as read back from storage.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SnapshotTask {
    pub id: String,
    #[serde(default)]
    pub done: bool,
}

/// A step entry as read back from storage.
///
/// Fields other than identifiers and completion flags are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStep {
    pub id: String,
    pub tasks: Vec<SnapshotTask>,
}

/// Step shape before its tasks are checked one by one.
#[derive(Deserialize)]
struct RawStep {
    id: String,
    #[serde(default)]
    tasks: Vec<Value>,
}

impl SnapshotStep {
    /// Reads one stored step, dropping tasks that lack a usable `id` or
    /// `done`. Returns `None` when the step itself has no usable `id`.
    fn from_value(value: Value) -> Option<Self> {
        let raw: RawStep = serde_json::from_value(value).ok()?;
        let tasks = raw
            .tasks
            .into_iter()
            .filter_map(|task| serde_json::from_value(task).ok())
            .collect();
        Some(Self { id: raw.id, tasks })
    }
}

/// A validated, non-empty sequence of persisted steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSnapshot {
    steps: Vec<SnapshotStep>,
}

impl PersistedSnapshot {
    /// Persisted steps in stored order.
    pub fn steps(&self) -> &[SnapshotStep] {
        &self.steps
    }

    /// First stored step with the given identifier.
    pub fn step(&self, id: &str) -> Option<&SnapshotStep> {
        self.steps.iter().find(|step| step.id == id)
    }
}

/// Outcome of reading the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredSnapshot {
    /// Nothing was stored
    Missing,
    /// A well-formed snapshot
    Valid(PersistedSnapshot),
    /// Something was stored but cannot be used; it should be discarded
    Invalid { reason: String },
}

impl StoredSnapshot {
    /// The usable snapshot, if any.
    pub fn into_valid(self) -> Option<PersistedSnapshot> {
        match self {
            StoredSnapshot::Valid(snapshot) => Some(snapshot),
            StoredSnapshot::Missing | StoredSnapshot::Invalid { .. } => None,
        }
    }
}

/// Validates raw stored text.
///
/// Unparseable text, a non-array and an empty array are reported as
/// [`StoredSnapshot::Invalid`]. Inside a valid array, step and task entries
/// without a usable `id` are skipped, like entries with unknown identifiers.
pub fn parse_snapshot(raw: &str) -> StoredSnapshot {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            return StoredSnapshot::Invalid {
                reason: format!("not valid JSON: {e}"),
            }
        }
    };

    let Value::Array(items) = value else {
        return StoredSnapshot::Invalid {
            reason: "expected an array of steps".to_string(),
        };
    };

    if items.is_empty() {
        return StoredSnapshot::Invalid {
            reason: "empty step array".to_string(),
        };
    }

    let total = items.len();
    let steps: Vec<SnapshotStep> = items
        .into_iter()
        .filter_map(SnapshotStep::from_value)
        .collect();
    if steps.len() < total {
        debug!("Skipped {} unreadable step entries", total - steps.len());
    }

    StoredSnapshot::Valid(PersistedSnapshot { steps })
}

/// Merges persisted completion flags onto the template.
///
/// Template order and every non-flag field come from `template`. Snapshot
/// entries with unknown identifiers are dropped; template entries missing
/// from the snapshot keep their default flag.
pub fn reconcile(template: &[Step], snapshot: Option<&PersistedSnapshot>) -> Vec<Step> {
    let Some(snapshot) = snapshot else {
        return template.to_vec();
    };

    template
        .iter()
        .map(|fresh_step| {
            let mut step = fresh_step.clone();
            if let Some(saved_step) = snapshot.step(&fresh_step.id) {
                for task in &mut step.tasks {
                    if let Some(saved_task) = saved_step.tasks.iter().find(|t| t.id == task.id) {
                        task.done = saved_task.done;
                    }
                }
            }
            step
        })
        .collect()
}
