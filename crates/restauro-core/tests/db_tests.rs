use restauro_core::Database;
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

#[test]
fn test_missing_record() {
    let (_temp_file, db) = create_test_db();
    assert!(db.get_record("central_v4").expect("read").is_none());
}

#[test]
fn test_put_and_get_record() {
    let (_temp_file, mut db) = create_test_db();

    let written_at = db.put_record("central_v4", "[1,2,3]").expect("write");
    let record = db.get_record("central_v4").expect("read").expect("present");

    assert_eq!(record.value, "[1,2,3]");
    assert_eq!(record.updated_at, written_at);
}

#[test]
fn test_put_overwrites_whole_value() {
    let (_temp_file, mut db) = create_test_db();

    db.put_record("central_v4", "a much longer first value").expect("write");
    db.put_record("central_v4", "short").expect("overwrite");

    let record = db.get_record("central_v4").expect("read").expect("present");
    assert_eq!(record.value, "short");
}

#[test]
fn test_keys_are_independent() {
    let (_temp_file, mut db) = create_test_db();

    db.put_record("one", "1").expect("write");
    db.put_record("two", "2").expect("write");
    assert!(db.delete_record("one").expect("delete"));

    assert!(db.get_record("one").expect("read").is_none());
    assert_eq!(db.get_record("two").expect("read").expect("present").value, "2");
}

#[test]
fn test_delete_missing_record_reports_false() {
    let (_temp_file, mut db) = create_test_db();
    assert!(!db.delete_record("central_v4").expect("delete"));
}

#[test]
fn test_records_survive_reopen() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    {
        let mut db = Database::new(temp_file.path()).expect("open");
        db.put_record("central_v4", "persisted").expect("write");
    }

    let db = Database::new(temp_file.path()).expect("reopen");
    assert_eq!(
        db.get_record("central_v4").expect("read").expect("present").value,
        "persisted"
    );
}
