//! Wrappers that render the whole workflow.

use std::fmt;

use jiff::Timestamp;

use super::datetime::LocalDateTime;
use crate::models::{Progress, Step};

/// Every step with its tasks, in template order.
///
/// # Examples
///
/// ```rust
/// use restauro_core::{display::Checklist, template::initial_workflow};
///
/// let steps = initial_workflow();
/// let output = Checklist(&steps).to_string();
/// assert!(output.contains("Passo 2: Configurar ComfyUI"));
/// ```
pub struct Checklist<'a>(pub &'a [Step]);

impl<'a> Checklist<'a> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, Step> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &Checklist<'a> {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Checklist<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "Nenhum passo definido.");
        }
        for step in self {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Title, overall progress, last save time and the checklist.
pub struct Dashboard<'a> {
    pub steps: &'a [Step],
    pub last_saved: Option<&'a Timestamp>,
}

impl<'a> Dashboard<'a> {
    pub fn new(steps: &'a [Step]) -> Self {
        Self {
            steps,
            last_saved: None,
        }
    }

    pub fn with_last_saved(mut self, saved: Option<&'a Timestamp>) -> Self {
        self.last_saved = saved;
        self
    }
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = Progress::compute(self.steps);

        writeln!(f, "# Central de Restauro")?;
        writeln!(f)?;
        writeln!(f, "{progress}")?;
        writeln!(f)?;
        match self.last_saved {
            Some(saved) => writeln!(f, "*Último salvamento: {}*", LocalDateTime(saved))?,
            None => writeln!(f, "*Progresso ainda não salvo.*")?,
        }
        if progress.is_finished() {
            writeln!(f)?;
            writeln!(f, "**Todos os passos concluídos!**")?;
        }
        writeln!(f)?;
        write!(f, "{}", Checklist(self.steps))
    }
}
