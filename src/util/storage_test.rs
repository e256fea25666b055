use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let mut storage = MemoryStorage::new();
    assert!(storage.is_empty());

    storage.set("token", "abc");
    assert_eq!(storage.get("token").as_deref(), Some("abc"));

    storage.set("token", "def");
    assert_eq!(storage.get("token").as_deref(), Some("def"));

    storage.remove("token");
    assert_eq!(storage.get("token"), None);
    assert!(storage.is_empty());
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let mut storage = MemoryStorage::with_entries([("user", "{}")]);
    storage.remove("token");
    assert!(storage.contains_key("user"));
}

#[test]
fn memory_storage_with_entries_seeds_values() {
    let storage = MemoryStorage::with_entries([("token", "t"), ("user", "u")]);
    assert_eq!(storage.get("token").as_deref(), Some("t"));
    assert_eq!(storage.get("user").as_deref(), Some("u"));
}

#[cfg(not(feature = "csr"))]
#[test]
fn browser_storage_is_empty_outside_browser() {
    let mut storage = BrowserStorage;
    storage.set("token", "abc");
    assert_eq!(storage.get("token"), None);
    storage.remove("token");
}
