//! Integration tests for the SQLite settings store.

use camino::Utf8PathBuf;
use failgrade_store::{SettingsStore, SqliteSettingsStore, StoreError};
use failgrade_types::{QuizId, QuizPolicyConfig};

fn store() -> SqliteSettingsStore {
    SqliteSettingsStore::open_in_memory("mdl_").expect("in-memory store")
}

#[test]
fn disabling_quiz_without_row_leaves_zero_rows() {
    let mut store = store();
    store.save(QuizId(5), false).unwrap();
    assert_eq!(store.row_count(QuizId(5)).unwrap(), 0);
    assert_eq!(store.get(QuizId(5)).unwrap(), None);
}

#[test]
fn enabling_twice_leaves_one_row() {
    let mut store = store();
    store.save(QuizId(5), true).unwrap();
    store.save(QuizId(5), true).unwrap();
    assert_eq!(store.row_count(QuizId(5)).unwrap(), 1);
    assert_eq!(
        store.get(QuizId(5)).unwrap(),
        Some(QuizPolicyConfig::new(QuizId(5), true))
    );
}

#[test]
fn disabling_removes_existing_row() {
    let mut store = store();
    store.save(QuizId(5), true).unwrap();
    store.save(QuizId(5), false).unwrap();
    assert_eq!(store.row_count(QuizId(5)).unwrap(), 0);
}

#[test]
fn delete_is_unconditional_and_idempotent() {
    let mut store = store();
    store.save(QuizId(1), true).unwrap();
    store.save(QuizId(2), true).unwrap();

    store.delete(QuizId(1)).unwrap();
    store.delete(QuizId(1)).unwrap();

    assert_eq!(store.row_count(QuizId(1)).unwrap(), 0);
    assert_eq!(store.row_count(QuizId(2)).unwrap(), 1);
}

#[test]
fn bulk_load_reports_every_requested_quiz() {
    let mut store = store();
    store.save(QuizId(2), true).unwrap();
    store.save(QuizId(4), true).unwrap();

    let map = store
        .load_for_quiz_list(&[QuizId(1), QuizId(2), QuizId(3), QuizId(4)])
        .unwrap();
    let flags: Vec<(i64, bool)> = map.into_iter().map(|(q, e)| (q.0, e)).collect();
    assert_eq!(flags, vec![(1, false), (2, true), (3, false), (4, true)]);
}

#[test]
fn bulk_load_handles_empty_and_large_lists() {
    let mut store = store();
    assert!(store.load_for_quiz_list(&[]).unwrap().is_empty());

    store.save(QuizId(1_200), true).unwrap();
    let ids: Vec<QuizId> = (1..=1_500).map(QuizId).collect();
    let map = store.load_for_quiz_list(&ids).unwrap();
    assert_eq!(map.len(), 1_500);
    assert_eq!(map.values().filter(|e| **e).count(), 1);
    assert_eq!(map.get(&QuizId(1_200)), Some(&true));
}

#[test]
fn table_uses_prefix() {
    let store = SqliteSettingsStore::open_in_memory("site_").unwrap();
    assert_eq!(store.table_name(), "site_quizaccess_failgrade");
    let count: i64 = store
        .conn()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'site_quizaccess_failgrade'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn duplicate_insert_surfaces_storage_error() {
    let store = store();
    store
        .conn()
        .execute(
            "INSERT INTO mdl_quizaccess_failgrade (quizid, failgradeenabled) VALUES (9, 1)",
            [],
        )
        .unwrap();
    let err = store
        .conn()
        .execute(
            "INSERT INTO mdl_quizaccess_failgrade (quizid, failgradeenabled) VALUES (9, 1)",
            [],
        )
        .map_err(StoreError::from)
        .unwrap_err();
    assert!(matches!(err, StoreError::Sqlite(_)));
    assert!(err.to_string().contains("UNIQUE"));
}

#[test]
fn settings_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("settings.sqlite")).unwrap();

    {
        let mut store = SqliteSettingsStore::open(&path, "mdl_").unwrap();
        store.save(QuizId(3), true).unwrap();
    }

    let store = SqliteSettingsStore::open(&path, "mdl_").unwrap();
    assert_eq!(store.row_count(QuizId(3)).unwrap(), 1);
}

#[test]
fn unsafe_table_prefix_is_rejected() {
    let err = SqliteSettingsStore::open_in_memory("mdl_x; DROP TABLE quiz; --").unwrap_err();
    assert!(matches!(err, StoreError::InvalidPrefix(_)));

    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("settings.sqlite")).unwrap();
    let err = SqliteSettingsStore::open(&path, "a b").unwrap_err();
    assert!(err.to_string().contains("invalid table prefix"));
    assert!(!path.exists());
}
