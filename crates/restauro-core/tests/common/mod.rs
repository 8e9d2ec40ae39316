use restauro_core::{Tracker, TrackerBuilder};
use tempfile::TempDir;

/// Database file name used by every test tracker
pub const DB_FILE: &str = "test.db";

/// Helper function to create a test tracker
pub async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let tracker = open_tracker(&temp_dir).await;
    (temp_dir, tracker)
}

/// Opens a tracker on the database inside `temp_dir`, as a restart would.
pub async fn open_tracker(temp_dir: &TempDir) -> Tracker {
    TrackerBuilder::new()
        .with_database_path(Some(temp_dir.path().join(DB_FILE)))
        .build()
        .await
        .expect("Failed to create tracker")
}
