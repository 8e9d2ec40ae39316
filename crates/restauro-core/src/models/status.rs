//! Enumerations describing task actions and step visuals.

use serde::{Deserialize, Serialize};

/// Kind of side effect attached to a task's action button.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Produces a file for the user to save
    Download,
}

impl ActionKind {
    /// Convert to the serialized string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Download => "download",
        }
    }
}

/// Optional visualization rendered alongside a step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visualization {
    /// Nothing extra is drawn
    #[default]
    None,

    /// The node-graph pipeline of the bundled workflow
    WorkflowDiagram,
}

/// Completion marker for a single task.
///
/// # Examples
///
/// ```rust
/// use restauro_core::models::check_mark;
///
/// assert_eq!(check_mark(true), "✓");
/// assert_eq!(check_mark(false), "○");
/// ```
pub fn check_mark(done: bool) -> &'static str {
    if done {
        "✓"
    } else {
        "○"
    }
}
