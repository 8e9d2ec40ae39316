//! Display implementations for domain models.
//!
//! Everything renders as markdown for the terminal renderer.

use std::fmt;

use crate::chat::{ChatMessage, ChatRole};
use crate::models::{check_mark, ActionKind, Progress, Step, Task, Visualization};

/// Width of the progress bar in cells.
const BAR_WIDTH: usize = 20;

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visualization::None => Ok(()),
            Visualization::WorkflowDiagram => {
                let chain = crate::artifacts::pipeline().unwrap_or_default();
                if chain.is_empty() {
                    return Ok(());
                }
                writeln!(f, "**Pipeline de Renderização:** `{}`", chain.join(" → "))
            }
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} **{}** `{}` *({})*",
            check_mark(self.done),
            self.text,
            self.id,
            self.location
        )?;
        writeln!(f, "  {}", self.detail)?;

        if let Some(note) = &self.technical_note {
            writeln!(f, "  > {note}")?;
        }
        if let Some(action) = &self.action {
            writeln!(f, "  [{}] {}", action.kind, action.label)?;
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = Progress::for_step(self);
        write!(
            f,
            "## {} ({}/{})",
            self.title, progress.completed, progress.total
        )?;
        if let Some(badge) = &self.badge {
            write!(f, " `{badge}`")?;
        }
        if self.is_complete() {
            write!(f, " {}", check_mark(true))?;
        }
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;

        for task in &self.tasks {
            write!(f, "{task}")?;
        }

        if self.visual != Visualization::None {
            writeln!(f)?;
            write!(f, "{}", self.visual)?;
        }
        writeln!(f)
    }
}

impl Progress {
    /// Segmented bar, e.g. `[████████░░░░░░░░░░░░]`.
    pub fn bar(&self) -> String {
        let filled = usize::from(self.percent) * BAR_WIDTH / 100;
        format!(
            "[{}{}]",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled)
        )
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` **{}%** ({}/{} tarefas)",
            self.bar(),
            self.percent,
            self.completed,
            self.total
        )
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "Você"),
            ChatRole::Assistant => write!(f, "Assistente"),
        }
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**{}:**", self.role)?;
        writeln!(f)?;
        writeln!(f, "{}", self.content)
    }
}
