use bookmarks_core::db::{open_db, open_db_in_memory};
use bookmarks_core::{
    BookmarkDraft, BookmarkPatch, BookmarkStore, KeyValueStore, ListFilter, ManualClock,
    MemoryKvStore, SqliteKvStore, StoreError, StoreIssue, ValidationError, STORAGE_KEY,
};

fn draft(title: &str, url: &str, tags: &[&str]) -> BookmarkDraft {
    BookmarkDraft::new(title, url).with_tags(tags.iter().map(|t| t.to_string()).collect())
}

#[test]
fn add_prepends_assigns_clock_id_and_persists() {
    let clock = ManualClock::starting_at(1_000);
    let mut store = BookmarkStore::with_clock(MemoryKvStore::new(), &clock);

    let first = store
        .add_bookmark(draft("Rust", "https://www.rust-lang.org", &["lang"]))
        .unwrap();
    clock.advance(5);
    let second = store
        .add_bookmark(BookmarkDraft::new("Crates", "https://crates.io"))
        .unwrap();

    assert_eq!(first.id, 1_000);
    assert_eq!(second.id, 1_005);
    assert!(second.tags.is_empty());
    let ids = store.bookmarks().iter().map(|b| b.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![1_005, 1_000]);

    let raw = store.storage().peek(STORAGE_KEY).unwrap();
    let persisted: serde_json::Value = serde_json::from_str(raw).unwrap();
    assert_eq!(persisted[0]["id"], 1_005);
    assert_eq!(persisted[1]["tags"][0], "lang");
}

#[test]
fn add_within_same_millisecond_keeps_ids_unique() {
    let clock = ManualClock::starting_at(500);
    let mut store = BookmarkStore::with_clock(MemoryKvStore::new(), &clock);

    let a = store.add_bookmark(BookmarkDraft::new("a", "https://a.test")).unwrap();
    let b = store.add_bookmark(BookmarkDraft::new("b", "https://b.test")).unwrap();
    clock.set(100);
    let c = store.add_bookmark(BookmarkDraft::new("c", "https://c.test")).unwrap();

    assert_eq!((a.id, b.id, c.id), (500, 501, 502));
}

#[test]
fn add_rejects_blank_title_without_touching_storage() {
    let mut store = BookmarkStore::new(MemoryKvStore::new());
    let err = store
        .add_bookmark(BookmarkDraft::new("  ", "https://a.test"))
        .unwrap_err();
    assert_eq!(err, StoreError::Validation(ValidationError::EmptyTitle));
    assert!(store.is_empty());
    assert!(store.storage().peek(STORAGE_KEY).is_none());
}

#[test]
fn update_merges_fields_and_keeps_id() {
    let clock = ManualClock::starting_at(42);
    let mut store = BookmarkStore::with_clock(MemoryKvStore::new(), &clock);
    store
        .add_bookmark(draft("Docs", "https://docs.rs", &["rust"]))
        .unwrap();

    let updated = store
        .update_bookmark(
            42,
            BookmarkPatch {
                url: Some("https://docs.rs/releases".to_string()),
                ..BookmarkPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.id, 42);
    assert_eq!(updated.title, "Docs");
    assert_eq!(updated.url, "https://docs.rs/releases");
    assert_eq!(updated.tags, vec!["rust"]);
    assert_eq!(store.get_bookmark_by_id(42), Some(&updated));
}

#[test]
fn update_unknown_id_is_not_found_and_does_not_persist() {
    let mut store = BookmarkStore::new(MemoryKvStore::new());
    let err = store
        .update_bookmark(7, BookmarkPatch::default())
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound(7));
    assert!(store.storage().peek(STORAGE_KEY).is_none());
}

#[test]
fn delete_filters_by_id_and_persists() {
    let clock = ManualClock::starting_at(1);
    let mut store = BookmarkStore::with_clock(MemoryKvStore::new(), &clock);
    store.add_bookmark(BookmarkDraft::new("a", "https://a.test")).unwrap();
    clock.advance(1);
    store.add_bookmark(BookmarkDraft::new("b", "https://b.test")).unwrap();

    assert!(store.delete_bookmark(1));
    assert!(!store.delete_bookmark(99));
    assert_eq!(store.len(), 1);
    assert!(store.get_bookmark_by_id(1).is_none());

    let raw = store.storage().peek(STORAGE_KEY).unwrap();
    assert!(!raw.contains("https://a.test"));
}

#[test]
fn delete_all_clears_memory_and_removes_blob() {
    let mut store = BookmarkStore::new(MemoryKvStore::new());
    store.add_bookmark(BookmarkDraft::new("a", "https://a.test")).unwrap();
    assert!(store.storage().peek(STORAGE_KEY).is_some());

    store.delete_all();
    assert!(store.is_empty());
    assert!(store.storage().peek(STORAGE_KEY).is_none());
}

#[test]
fn corrupt_blob_loads_empty_with_load_issue() {
    let storage = MemoryKvStore::new().with_item(STORAGE_KEY, "{broken");
    let store = BookmarkStore::new(storage);
    assert!(store.is_empty());
    assert_eq!(store.issue(), Some(StoreIssue::LoadFailed));
    assert_eq!(store.issue().unwrap().to_string(), "Failed to load data");
}

#[test]
fn read_failure_loads_empty_with_load_issue() {
    let mut storage = MemoryKvStore::new()
        .with_item(STORAGE_KEY, r#"[{"id":1,"title":"a","url":"u","tags":[]}]"#);
    storage.fail_reads(true);
    let store = BookmarkStore::new(storage);
    assert!(store.is_empty());
    assert_eq!(store.issue(), Some(StoreIssue::LoadFailed));
}

#[test]
fn write_failure_keeps_memory_and_raises_save_issue() {
    let mut storage = MemoryKvStore::new();
    storage.fail_writes(true);
    let mut store = BookmarkStore::new(storage);

    let created = store
        .add_bookmark(BookmarkDraft::new("a", "https://a.test"))
        .unwrap();
    assert_eq!(store.get_bookmark_by_id(created.id), Some(&created));
    assert_eq!(store.issue(), Some(StoreIssue::SaveFailed));
    assert_eq!(store.issue().unwrap().to_string(), "Failed to save data");

    store.clear_issue();
    assert_eq!(store.issue(), None);
}

#[test]
fn list_filters_by_tag_and_text_and_tags_are_sorted() {
    let clock = ManualClock::starting_at(10);
    let mut store = BookmarkStore::with_clock(MemoryKvStore::new(), &clock);
    store
        .add_bookmark(draft("Rust Book", "https://doc.rust-lang.org/book", &["rust", "Docs"]))
        .unwrap();
    clock.advance(1);
    store
        .add_bookmark(draft("Python", "https://python.org", &["python", "docs"]))
        .unwrap();

    let rust = store.list(&ListFilter {
        tag: Some("RUST".to_string()),
        text: None,
    });
    assert_eq!(rust.len(), 1);
    assert_eq!(rust[0].title, "Rust Book");

    let text = store.list(&ListFilter {
        tag: None,
        text: Some("python.ORG".to_string()),
    });
    assert_eq!(text.len(), 1);

    assert_eq!(store.list(&ListFilter::default()).len(), 2);
    assert_eq!(store.tags(), vec!["Docs", "docs", "python", "rust"]);
}

#[test]
fn sqlite_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.sqlite3");

    let created_id = {
        let conn = open_db(&path).unwrap();
        let kv = SqliteKvStore::try_new(&conn).unwrap();
        let mut store = BookmarkStore::new(kv);
        store
            .add_bookmark(draft("Rust", "https://www.rust-lang.org", &["lang"]))
            .unwrap()
            .id
    };

    let conn = open_db(&path).unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let store = BookmarkStore::new(kv);
    assert_eq!(store.issue(), None);
    let loaded = store.get_bookmark_by_id(created_id).unwrap();
    assert_eq!(loaded.url, "https://www.rust-lang.org");
    assert_eq!(loaded.tags, vec!["lang"]);
}

#[test]
fn sqlite_delete_all_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let mut kv = SqliteKvStore::try_new(&conn).unwrap();
    {
        let mut store = BookmarkStore::new(&mut kv);
        store.add_bookmark(BookmarkDraft::new("a", "https://a.test")).unwrap();
        store.delete_all();
    }
    assert_eq!(kv.get_item(STORAGE_KEY).unwrap(), None);
}

#[test]
fn add_after_importing_max_id_picks_unused_id() {
    let clock = ManualClock::starting_at(1_000);
    let mut store = BookmarkStore::with_clock(MemoryKvStore::new(), &clock);
    store
        .import_data(r#"[{"id": 9223372036854775807, "title": "t", "url": "u"}]"#)
        .unwrap();

    let first = store
        .add_bookmark(BookmarkDraft::new("a", "https://a.test"))
        .unwrap();
    let second = store
        .add_bookmark(BookmarkDraft::new("b", "https://b.test"))
        .unwrap();

    assert_eq!(first.id, 1_000);
    assert_eq!(second.id, 1);
    assert_eq!(store.len(), 3);
    assert_eq!(store.issue(), None);
}

#[test]
fn missing_or_empty_blob_loads_empty_without_issue() {
    let missing = BookmarkStore::new(MemoryKvStore::new());
    assert!(missing.is_empty());
    assert_eq!(missing.issue(), None);

    let empty = BookmarkStore::new(MemoryKvStore::new().with_item(STORAGE_KEY, ""));
    assert!(empty.is_empty());
    assert_eq!(empty.issue(), None);
}

#[test]
fn load_can_be_reinvoked_after_storage_changes() {
    let conn = open_db_in_memory().unwrap();
    let mut store = BookmarkStore::new(SqliteKvStore::try_new(&conn).unwrap());
    assert!(store.is_empty());

    let mut writer = SqliteKvStore::try_new(&conn).unwrap();
    writer
        .set_item(
            STORAGE_KEY,
            r#"[{"id":9,"title":"Nine","url":"https://nine.test","tags":["n"]}]"#,
        )
        .unwrap();

    store.load();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get_bookmark_by_id(9).unwrap().title, "Nine");
    assert_eq!(store.issue(), None);
}

#[test]
fn tag_filter_ignores_non_ascii_case() {
    let mut store = BookmarkStore::new(MemoryKvStore::new());
    store
        .add_bookmark(draft("Zorn", "https://zorn.test", &["Ärger"]))
        .unwrap();

    let matched = store.list(&ListFilter {
        tag: Some("ärger".to_string()),
        text: None,
    });
    assert_eq!(matched.len(), 1);
}

#[test]
fn delete_all_write_failure_raises_save_issue() {
    let mut storage = MemoryKvStore::new()
        .with_item(STORAGE_KEY, r#"[{"id":1,"title":"a","url":"u","tags":[]}]"#);
    storage.fail_writes(true);
    let mut store = BookmarkStore::new(storage);
    assert_eq!(store.len(), 1);

    store.delete_all();
    assert!(store.is_empty());
    assert_eq!(store.issue(), Some(StoreIssue::SaveFailed));
    assert!(store.storage().peek(STORAGE_KEY).is_some());
}

#[test]
fn import_write_failure_replaces_memory_and_raises_save_issue() {
    let mut storage = MemoryKvStore::new();
    storage.fail_writes(true);
    let mut store = BookmarkStore::new(storage);

    let count = store
        .import_data(r#"[{"id": 4, "title": "Four", "url": "https://four.test"}]"#)
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(store.get_bookmark_by_id(4).unwrap().title, "Four");
    assert_eq!(store.issue(), Some(StoreIssue::SaveFailed));
    assert!(store.storage().peek(STORAGE_KEY).is_none());
}

#[test]
fn delete_of_unknown_id_still_persists() {
    let storage = MemoryKvStore::new().with_item(
        STORAGE_KEY,
        r#"[ {"id": 1, "title": "a", "url": "u", "tags": []} ]"#,
    );
    let mut store = BookmarkStore::new(storage);

    assert!(!store.delete_bookmark(99));
    assert_eq!(
        store.storage().peek(STORAGE_KEY),
        Some(r#"[{"id":1,"title":"a","url":"u","tags":[]}]"#)
    );
}
