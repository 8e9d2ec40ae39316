//! Wrappers for the outcome of state-changing commands.

use std::fmt;
use std::path::Path;

use crate::artifacts::Artifact;
use crate::models::{check_mark, Progress, Task};

/// A task whose flag was just changed, with the resulting overall progress.
pub struct TaskUpdate<'a> {
    pub step_id: &'a str,
    pub task: &'a Task,
    pub progress: Progress,
    /// False when the flag already had the requested value
    pub changed: bool,
}

impl fmt::Display for TaskUpdate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.task.done { "concluída" } else { "pendente" };
        if self.changed {
            writeln!(
                f,
                "{} `{}/{}` marcada como {state}.",
                check_mark(self.task.done),
                self.step_id,
                self.task.id
            )?;
        } else {
            writeln!(
                f,
                "`{}/{}` já estava {state}.",
                self.step_id, self.task.id
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.progress)
    }
}

/// An artifact that was written to disk.
pub struct ArtifactWritten<'a> {
    pub artifact: Artifact,
    pub path: &'a Path,
}

impl fmt::Display for ArtifactWritten<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Arquivo gerado: `{}`", self.path.display())?;
        writeln!(f)?;
        writeln!(
            f,
            "*{} bytes. A tarefa não é marcada automaticamente.*",
            self.artifact.contents().len()
        )
    }
}
