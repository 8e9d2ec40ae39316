use crate::models::{ActionKind, Progress, Step, Task, Visualization};
use crate::template::initial_workflow;

fn step_with(tasks: Vec<Task>) -> Step {
    Step {
        id: "s".to_string(),
        title: "Step".to_string(),
        description: String::new(),
        icon: "cpu".to_string(),
        color: String::new(),
        text_color: String::new(),
        badge: None,
        visual: Visualization::None,
        tasks,
    }
}

fn task(id: &str, done: bool) -> Task {
    let mut task = Task::new(id, id, "here", "detail");
    task.done = done;
    task
}

#[test]
fn test_progress_counts_every_task() {
    let mut steps = initial_workflow();
    steps[0].tasks[0].done = true;
    steps[1].tasks[2].done = true;

    let progress = Progress::compute(&steps);
    assert_eq!(progress.total, 7);
    assert_eq!(progress.completed, 2);
    assert_eq!(progress.percent, 29);
    assert_eq!(progress.pending(), 5);
}

#[test]
fn test_progress_rounds_half_up() {
    // 1/8 = 12.5%
    assert_eq!(Progress::from_counts(8, 1).percent, 13);
    // 2/3 = 66.67%
    assert_eq!(Progress::from_counts(3, 2).percent, 67);
    // 1/200 = 0.5%
    assert_eq!(Progress::from_counts(200, 1).percent, 1);
    // 1/201 < 0.5%
    assert_eq!(Progress::from_counts(201, 1).percent, 0);
}

#[test]
fn test_progress_percent_is_bounded() {
    for total in 0..40 {
        for completed in 0..=total {
            let progress = Progress::from_counts(total, completed);
            assert!(progress.percent <= 100);
            assert_eq!(progress.percent == 100, total > 0 && completed == total);
        }
    }
}

#[test]
fn test_progress_of_empty_workflow() {
    let progress = Progress::compute(&[]);
    assert_eq!(progress, Progress::default());
    assert!(!progress.is_finished());
}

#[test]
fn test_step_progress_and_completion() {
    let step = step_with(vec![task("a", true), task("b", false)]);
    assert_eq!(Progress::for_step(&step).percent, 50);
    assert!(!step.is_complete());

    let step = step_with(vec![task("a", true), task("b", true)]);
    assert!(step.is_complete());
}

#[test]
fn test_step_without_tasks_is_never_complete() {
    let step = step_with(Vec::new());
    assert!(!step.is_complete());
    assert_eq!(Progress::for_step(&step).percent, 0);
}

#[test]
fn test_task_serializes_camel_case_and_skips_absent_fields() {
    let task = Task::new("t", "Text", "Desk", "Detail").with_technical_note("note");
    let value = serde_json::to_value(&task).expect("serialize");

    assert_eq!(value["technicalNote"], "note");
    assert!(value.get("locationColor").is_none());
    assert!(value.get("action").is_none());
    assert_eq!(value["done"], false);
}

#[test]
fn test_step_round_trips_through_json() {
    let step = initial_workflow().remove(0);
    let json = serde_json::to_string(&step).expect("serialize");
    assert!(json.contains("\"textColor\""));

    let back: Step = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, step);
}

#[test]
fn test_action_kind_serializes_lowercase() {
    let value = serde_json::to_value(ActionKind::Download).expect("serialize");
    assert_eq!(value, ActionKind::Download.as_str());
    assert!(serde_json::from_str::<ActionKind>(r#""link""#).is_err());
}
