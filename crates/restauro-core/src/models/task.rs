//! Task model definition.

use serde::{Deserialize, Serialize};

use super::ActionKind;

/// Action button attached to a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskAction {
    /// What pressing the action does
    pub kind: ActionKind,

    /// Button caption
    pub label: String,
}

/// A leaf unit of work inside a step.
///
/// Only [`Task::done`] ever changes at runtime; every other field comes from
/// the workflow template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier, unique within the parent step
    pub id: String,

    /// Checklist line shown to the user
    pub text: String,

    /// Where the work happens (folder, window, node)
    pub location: String,

    /// Display hint for the location label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_color: Option<String>,

    /// Free-text explanation
    pub detail: String,

    /// Extra note for technical readers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_note: Option<String>,

    /// Completion flag
    #[serde(default)]
    pub done: bool,

    /// Side-effecting action, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<TaskAction>,
}

impl Task {
    /// Creates a pending task with no optional fields set.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        location: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            location: location.into(),
            location_color: None,
            detail: detail.into(),
            technical_note: None,
            done: false,
            action: None,
        }
    }

    /// Sets the location display hint.
    pub fn with_location_color(mut self, color: impl Into<String>) -> Self {
        self.location_color = Some(color.into());
        self
    }

    /// Sets the technical note.
    pub fn with_technical_note(mut self, note: impl Into<String>) -> Self {
        self.technical_note = Some(note.into());
        self
    }

    /// Attaches an action button.
    pub fn with_action(mut self, kind: ActionKind, label: impl Into<String>) -> Self {
        self.action = Some(TaskAction {
            kind,
            label: label.into(),
        });
        self
    }
}
