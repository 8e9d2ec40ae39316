//! Progress aggregation over the workflow state.

use serde::{Deserialize, Serialize};

use super::Step;

/// Derived completion counters for a set of steps.
///
/// Always recomputed from the state it summarizes; never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Progress {
    /// Number of tasks across all steps
    pub total: usize,
    /// Number of tasks marked done
    pub completed: usize,
    /// Completion percentage, rounded half away from zero
    pub percent: u8,
}

impl Progress {
    /// Builds progress from raw counters.
    ///
    /// A total of zero yields zero percent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use restauro_core::models::Progress;
    ///
    /// assert_eq!(Progress::from_counts(5, 2).percent, 40);
    /// assert_eq!(Progress::from_counts(3, 1).percent, 33);
    /// assert_eq!(Progress::from_counts(8, 1).percent, 13);
    /// assert_eq!(Progress::from_counts(0, 0).percent, 0);
    /// ```
    pub fn from_counts(total: usize, completed: usize) -> Self {
        let completed = completed.min(total);
        let percent = if total == 0 {
            0
        } else {
            // floor(100c/t + 1/2) in integers
            ((200 * completed + total) / (2 * total)) as u8
        };

        Self {
            total,
            completed,
            percent,
        }
    }

    /// Computes progress across every task of every step.
    pub fn compute(steps: &[Step]) -> Self {
        let total = steps.iter().map(|step| step.tasks.len()).sum();
        let completed = steps.iter().map(Step::completed_tasks).sum();
        Self::from_counts(total, completed)
    }

    /// Computes progress for a single step.
    pub fn for_step(step: &Step) -> Self {
        Self::from_counts(step.tasks.len(), step.completed_tasks())
    }

    /// Number of tasks still open.
    pub fn pending(&self) -> usize {
        self.total - self.completed
    }

    /// True once every task is done (and there is at least one).
    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}
