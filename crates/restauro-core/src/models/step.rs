//! Step model definition and related functionality.

use serde::{Deserialize, Serialize};

use super::{Task, Visualization};

/// One phase of the workflow, holding an ordered list of tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Identifier, unique across the template
    pub id: String,

    /// Heading of the step
    pub title: String,

    /// One-line summary of the step
    pub description: String,

    /// Icon name used by graphical front ends
    pub icon: String,

    /// Accent color used by graphical front ends
    pub color: String,

    /// Text color used by graphical front ends
    pub text_color: String,

    /// Short highlight label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,

    /// Extra visualization rendered with the step
    #[serde(default)]
    pub visual: Visualization,

    /// Ordered tasks
    pub tasks: Vec<Task>,
}

impl Step {
    /// Finds a task by identifier.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Finds a task by identifier for mutation.
    pub(crate) fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    /// Number of completed tasks.
    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|task| task.done).count()
    }

    /// True when the step has tasks and all of them are done.
    pub fn is_complete(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|task| task.done)
    }
}
