mod common;

use common::{create_test_tracker, open_tracker, DB_FILE};
use restauro_core::{
    snapshot::parse_snapshot,
    template::{initial_workflow, STORAGE_KEY},
    Progress, ProgressStore, RestauroError,
};
use tempfile::TempDir;

fn store_for(temp_dir: &TempDir) -> ProgressStore {
    ProgressStore::new(temp_dir.path().join(DB_FILE), STORAGE_KEY)
}

#[tokio::test]
async fn test_first_run_starts_from_template() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    assert_eq!(tracker.steps(), initial_workflow().as_slice());
    assert_eq!(
        tracker.progress(),
        Progress {
            total: 7,
            completed: 0,
            percent: 0
        }
    );
}

#[tokio::test]
async fn test_reload_restores_flags() {
    let (temp_dir, mut tracker) = create_test_tracker().await;

    tracker.toggle_task("step1", "dl_script").await.expect("toggle");
    tracker.toggle_task("step2", "load_json").await.expect("toggle");
    tracker.toggle_task("step3", "queue").await.expect("toggle");
    let before = tracker.steps().to_vec();
    drop(tracker);

    let reloaded = open_tracker(&temp_dir).await;
    assert_eq!(reloaded.steps(), before.as_slice());
    assert_eq!(reloaded.progress().completed, 3);
    assert_eq!(reloaded.progress().percent, 43);
}

#[tokio::test]
async fn test_every_mutation_is_written_through() {
    let (temp_dir, mut tracker) = create_test_tracker().await;
    let store = store_for(&temp_dir);

    tracker.toggle_task("step2", "dl_json").await.expect("toggle");
    let first = store.read_raw().await.expect("read").expect("written");
    tracker.toggle_task("step2", "dl_json").await.expect("toggle");
    let second = store.read_raw().await.expect("read").expect("written");

    assert_ne!(first, second);
    let snapshot = parse_snapshot(&second).into_valid().expect("valid");
    let step2 = snapshot.step("step2").expect("step2");
    assert!(step2.tasks.iter().all(|task| !task.done));
}

#[tokio::test]
async fn test_stored_record_is_the_full_state() {
    let (temp_dir, mut tracker) = create_test_tracker().await;
    tracker.toggle_task("step1", "run_script").await.expect("toggle");

    let raw = store_for(&temp_dir)
        .read_raw()
        .await
        .expect("read")
        .expect("written");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");

    let steps = value.as_array().expect("array");
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["title"], "Passo 1: Padronização Híbrida");
    assert_eq!(steps[0]["tasks"][1]["done"], true);
}

#[tokio::test]
async fn test_corrupt_record_is_discarded() {
    for corrupt in ["not-json", "{}", "[]", "42"] {
        let temp_dir = TempDir::new().expect("temp dir");
        let store = store_for(&temp_dir);
        store.write_raw(corrupt.to_string()).await.expect("seed");

        let tracker = open_tracker(&temp_dir).await;

        assert_eq!(tracker.steps(), initial_workflow().as_slice(), "input {corrupt}");
        assert!(tracker.last_saved().is_none());
        assert!(
            store.read_raw().await.expect("read").is_none(),
            "corrupt record {corrupt} should be removed"
        );
    }
}

#[tokio::test]
async fn test_entries_without_id_do_not_discard_progress() {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = store_for(&temp_dir);
    let raw = r#"[{"id":"step1","tasks":[{"id":"dl_script","done":true},{"note":"legacy"}]}]"#;
    store.write_raw(raw.to_string()).await.expect("seed");

    let tracker = open_tracker(&temp_dir).await;

    assert!(tracker.steps()[0].task("dl_script").expect("task").done);
    assert_eq!(tracker.progress().completed, 1);
    assert!(tracker.last_saved().is_some());
    assert_eq!(store.read_raw().await.expect("read").as_deref(), Some(raw));
}

#[tokio::test]
async fn test_stale_snapshot_is_reconciled() {
    let temp_dir = TempDir::new().expect("temp dir");
    let stale = r#"[
        {"id": "step1", "title": "Passo 1 (antigo)", "tasks": [
            {"id": "dl_script", "text": "Descarregar v5", "done": true},
            {"id": "old_manual_step", "done": true}
        ]},
        {"id": "step_removed", "tasks": [{"id": "x", "done": true}]}
    ]"#;
    store_for(&temp_dir)
        .write_raw(stale.to_string())
        .await
        .expect("seed");

    let tracker = open_tracker(&temp_dir).await;

    let step1 = &tracker.steps()[0];
    assert_eq!(step1.title, "Passo 1: Padronização Híbrida");
    assert_eq!(step1.tasks.len(), 2);
    assert!(step1.task("dl_script").expect("dl_script").done);
    assert!(!step1.task("run_script").expect("run_script").done);
    assert_eq!(tracker.steps().len(), 3);
    assert_eq!(tracker.progress().completed, 1);
    assert!(tracker.last_saved().is_some());
}

#[tokio::test]
async fn test_unknown_ids_leave_storage_untouched() {
    let (temp_dir, mut tracker) = create_test_tracker().await;

    let err = tracker
        .toggle_task("step9", "dl_script")
        .await
        .expect_err("unknown step");
    assert!(matches!(err, RestauroError::StepNotFound { ref id } if id == "step9"));
    assert!(store_for(&temp_dir).read_raw().await.expect("read").is_none());
}

#[tokio::test]
async fn test_reset_survives_restart() {
    let (temp_dir, mut tracker) = create_test_tracker().await;
    tracker.toggle_task("step1", "dl_script").await.expect("toggle");
    tracker.reset().await.expect("reset");
    drop(tracker);

    let reloaded = open_tracker(&temp_dir).await;
    assert_eq!(reloaded.steps(), initial_workflow().as_slice());
    assert!(reloaded.last_saved().is_none());
}
