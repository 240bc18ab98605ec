use rusqlite::Connection;
use taskpad_core::db::schema::{read_version, upgrade, SUPPORTED_VERSION};
use taskpad_core::db::{open_file, open_memory, DbError};
use taskpad_core::{KeyValueStore, KvError, SqliteKeyValueStore};

#[test]
fn memory_store_is_fully_upgraded() {
    let conn = open_memory().unwrap();

    assert_eq!(read_version(&conn).unwrap(), SUPPORTED_VERSION);
    assert!(has_table(&conn, "kv_entries"));
}

#[test]
fn upgrade_is_a_no_op_on_current_schema() {
    let mut conn = open_memory().unwrap();
    assert_eq!(upgrade(&mut conn).unwrap(), 0);

    let mut fresh = Connection::open_in_memory().unwrap();
    assert_eq!(upgrade(&mut fresh).unwrap(), SUPPORTED_VERSION as usize);
}

#[test]
fn reopening_file_keeps_schema_and_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpad.sqlite3");

    let first = SqliteKeyValueStore::open(&path).unwrap();
    first.set("todoAppDarkMode", "true").unwrap();
    drop(first);

    let second = SqliteKeyValueStore::open(&path).unwrap();
    assert_eq!(read_version(second.connection()).unwrap(), SUPPORTED_VERSION);
    assert_eq!(
        second.get("todoAppDarkMode").unwrap().as_deref(),
        Some("true")
    );
}

#[test]
fn newer_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_file(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, SUPPORTED_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = SqliteKeyValueStore::open(&path).err().unwrap();
    assert!(matches!(err, KvError::Db(DbError::SchemaTooNew { .. })));
}

#[test]
fn unopenable_path_reports_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-parent").join("taskpad.sqlite3");

    match open_file(&path).unwrap_err() {
        DbError::Open { target, .. } => assert!(target.ends_with("taskpad.sqlite3")),
        other => panic!("unexpected error: {other}"),
    }
}

fn has_table(conn: &Connection, name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [name],
        |row| row.get(0),
    )
    .unwrap()
}
