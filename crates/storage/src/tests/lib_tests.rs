use super::*;

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn missing_key_reads_as_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert_eq!(storage.get_value("user").await.expect("read"), None);
}

#[tokio::test]
async fn set_value_overwrites_previous_value() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.set_value("user", "{\"email\":\"a@b.c\"}").await.expect("write");
    storage.set_value("user", "{\"email\":\"d@e.f\"}").await.expect("rewrite");

    let value = storage.get_value("user").await.expect("read");
    assert_eq!(value.as_deref(), Some("{\"email\":\"d@e.f\"}"));

    let entries = storage.list_entries().await.expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, "user");
}

#[tokio::test]
async fn remove_value_reports_whether_key_existed() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.set_value("user", "{}").await.expect("write");

    assert!(storage.remove_value("user").await.expect("remove"));
    assert!(!storage.remove_value("user").await.expect("remove again"));
    assert_eq!(storage.get_value("user").await.expect("read"), None);
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("cinema_storage_test_{suffix}"));
    let db_path = temp_root.join("nested").join("session.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    storage.set_value("user", "{}").await.expect("write");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    let reopened = Storage::new(&database_url).await.expect("reopen");
    assert_eq!(
        reopened.get_value("user").await.expect("read").as_deref(),
        Some("{}")
    );
    drop(reopened);

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn memory_urls_have_no_parent_directory() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/cinema.db?mode=rwc"),
        Some(PathBuf::from("./data/cinema.db"))
    );
}
