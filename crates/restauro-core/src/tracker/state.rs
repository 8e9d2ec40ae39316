//! In-memory workflow state.

use crate::{
    error::{RestauroError, Result},
    models::{Progress, Step, Task},
    snapshot::{reconcile, PersistedSnapshot},
};

/// The live checklist.
///
/// Structurally identical to its template at all times; only task
/// completion flags differ. Mutation goes through [`WorkflowState::toggle`],
/// [`WorkflowState::set_done`] and [`WorkflowState::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState {
    template: Vec<Step>,
    steps: Vec<Step>,
}

impl WorkflowState {
    /// Seeds the state by reconciling `snapshot` onto `template`.
    pub fn from_snapshot(template: Vec<Step>, snapshot: Option<&PersistedSnapshot>) -> Self {
        let steps = reconcile(&template, snapshot);
        Self { template, steps }
    }

    /// State with template defaults.
    pub fn from_template(template: Vec<Step>) -> Self {
        Self::from_snapshot(template, None)
    }

    /// Current steps in template order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Finds a step by identifier.
    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == step_id)
    }

    /// Finds the first task with `task_id` in any step.
    pub fn find_task(&self, task_id: &str) -> Option<(&Step, &Task)> {
        self.steps
            .iter()
            .find_map(|step| step.task(task_id).map(|task| (step, task)))
    }

    /// Aggregated progress over all steps.
    pub fn progress(&self) -> Progress {
        Progress::compute(&self.steps)
    }

    /// Flips one task's completion flag.
    pub fn toggle(&mut self, step_id: &str, task_id: &str) -> Result<&Task> {
        let task = self.task_mut(step_id, task_id)?;
        task.done = !task.done;
        Ok(&*task)
    }

    /// Sets one task's completion flag. Returns the task and whether it changed.
    pub fn set_done(&mut self, step_id: &str, task_id: &str, done: bool) -> Result<(&Task, bool)> {
        let task = self.task_mut(step_id, task_id)?;
        let changed = task.done != done;
        task.done = done;
        Ok((&*task, changed))
    }

    /// Restores every flag to its template default.
    pub fn reset(&mut self) {
        self.steps = self.template.clone();
    }

    fn task_mut(&mut self, step_id: &str, task_id: &str) -> Result<&mut Task> {
        let step = self
            .steps
            .iter_mut()
            .find(|step| step.id == step_id)
            .ok_or_else(|| RestauroError::StepNotFound {
                id: step_id.to_string(),
            })?;

        step.task_mut(task_id)
            .ok_or_else(|| RestauroError::TaskNotFound {
                step_id: step_id.to_string(),
                task_id: task_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::initial_workflow;

    #[test]
    fn test_toggle_flips_only_target() {
        let mut state = WorkflowState::from_template(initial_workflow());
        let before = state.clone();

        let task = state.toggle("step2", "load_json").expect("toggle");
        assert!(task.done);

        for (old, new) in before.steps().iter().zip(state.steps()) {
            for (old_task, new_task) in old.tasks.iter().zip(&new.tasks) {
                if new.id == "step2" && new_task.id == "load_json" {
                    assert_ne!(old_task.done, new_task.done);
                } else {
                    assert_eq!(old_task, new_task);
                }
            }
        }
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut state = WorkflowState::from_template(initial_workflow());
        state.toggle("step1", "dl_script").expect("toggle");
        state.toggle("step1", "dl_script").expect("toggle");
        assert_eq!(state.steps(), initial_workflow().as_slice());
    }

    #[test]
    fn test_toggle_unknown_ids() {
        let mut state = WorkflowState::from_template(initial_workflow());
        assert!(matches!(
            state.toggle("nope", "dl_script"),
            Err(RestauroError::StepNotFound { .. })
        ));
        assert!(matches!(
            state.toggle("step1", "nope"),
            Err(RestauroError::TaskNotFound { .. })
        ));
        assert_eq!(state.progress().completed, 0);
    }

    #[test]
    fn test_set_done_reports_change() {
        let mut state = WorkflowState::from_template(initial_workflow());
        let (_, changed) = state.set_done("step3", "queue", true).expect("set");
        assert!(changed);
        let (task, changed) = state.set_done("step3", "queue", true).expect("set");
        assert!(task.done);
        assert!(!changed);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = WorkflowState::from_template(initial_workflow());
        state.toggle("step1", "run_script").expect("toggle");
        state.toggle("step3", "queue").expect("toggle");
        state.reset();
        assert_eq!(state.progress().completed, 0);
    }

    #[test]
    fn test_find_task_across_steps() {
        let state = WorkflowState::from_template(initial_workflow());
        let (step, task) = state.find_task("dl_json").expect("present");
        assert_eq!(step.id, "step2");
        assert_eq!(task.id, "dl_json");
        assert!(state.find_task("missing").is_none());
    }
}
