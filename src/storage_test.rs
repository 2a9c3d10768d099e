use super::*;

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_starts_empty() {
    let storage = MemoryStorage::new();
    assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
}

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "abc").unwrap();
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

    storage.set_item(TOKEN_KEY, "def").unwrap();
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("def"));

    storage.remove_item(TOKEN_KEY).unwrap();
    assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
}

#[test]
fn memory_storage_with_token_is_seeded() {
    let storage = MemoryStorage::with_token("seeded");
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("seeded"));
}

// =============================================================
// FileStorage
// =============================================================

#[test]
fn file_storage_missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("storage.json"));
    assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
    assert!(!storage.path().exists());
}

#[test]
fn file_storage_creates_parent_dirs_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    FileStorage::new(&path).set_item(TOKEN_KEY, "abc").unwrap();
    assert!(path.exists());

    // A fresh handle models a process restart.
    let reopened = FileStorage::new(&path);
    assert_eq!(reopened.get_item(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
}

#[test]
fn file_storage_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("storage.json"));
    storage.set_item("theme", "dark").unwrap();
    storage.set_item(TOKEN_KEY, "abc").unwrap();
    storage.remove_item(TOKEN_KEY).unwrap();

    assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
    assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn file_storage_remove_missing_key_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("storage.json"));
    storage.remove_item(TOKEN_KEY).unwrap();
    assert!(!storage.path().exists());
}

#[test]
fn file_storage_corrupt_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let err = FileStorage::new(&path).get_item(TOKEN_KEY).unwrap_err();
    assert!(matches!(err, StorageError::Corrupt { .. }));
}

#[test]
fn file_storage_blank_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "\n").unwrap();
    assert!(FileStorage::new(&path).get_item(TOKEN_KEY).unwrap().is_none());
}
