use member_core::db::migrations::latest_version;
use member_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;
use std::time::{Duration, Instant};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "members");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("members.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO members (name, email, profession, about, image)
             VALUES ('Ada', 'ada@example.com', 'engineer', 'bio', x'01');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM members;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn upgrading_version_one_database_keeps_rows_and_backfills_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            profession TEXT NOT NULL,
            about TEXT NOT NULL,
            image BLOB NOT NULL
        );
        INSERT INTO members (name, email, profession, about, image)
        VALUES ('Ada', 'ada@example.com', 'engineer', 'bio', x'01');
        PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    let upgraded = open_db(&path).unwrap();
    assert_eq!(schema_version(&upgraded), latest_version());
    let (name, created_at): (String, i64) = upgraded
        .query_row(
            "SELECT name, created_at FROM members WHERE id = 1;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "Ada");
    assert!(created_at > 0);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_path_in_missing_directory_returns_error_instead_of_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("members.sqlite3");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Open(_)), "unexpected error: {err}");
    assert_eq!(err.error_code(), "db_open_failed");
}

#[test]
fn opening_current_database_does_not_wait_for_active_writer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("members.sqlite3");
    drop(open_db(&path).unwrap());

    let writer = Connection::open(&path).unwrap();
    writer.execute_batch("BEGIN IMMEDIATE;").unwrap();

    let started_at = Instant::now();
    let reader = open_db(&path).unwrap();
    assert!(started_at.elapsed() < Duration::from_secs(2));
    assert_eq!(schema_version(&reader), latest_version());

    writer.execute_batch("COMMIT;").unwrap();
}

#[test]
fn migrations_create_no_unused_indexes() {
    let conn = open_db_in_memory().unwrap();
    let indexes: i64 = conn
        .query_row(
            "SELECT COUNT(*)
             FROM sqlite_master
             WHERE type = 'index' AND tbl_name = 'members' AND sql IS NOT NULL;",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(indexes, 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
