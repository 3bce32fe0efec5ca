use rusqlite::Connection;
use teamfeed_core::db::migrations::latest_version;
use teamfeed_core::db::{open_db, open_db_in_memory, DbError};
use teamfeed_core::{RepoError, SqlitePostRepository, SqliteUserRepository, User, UserRepository};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in [
        "users",
        "user_expertise",
        "posts",
        "post_tags",
        "comments",
        "notifications",
    ] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn reopening_a_file_database_keeps_data_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("teamfeed.db");

    let conn = open_db(&path).unwrap();
    SqliteUserRepository::try_new(&conn)
        .unwrap()
        .upsert_user(&User::new("u1", "Ada").with_team(5_i64))
        .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let users = SqliteUserRepository::try_new(&conn)
        .unwrap()
        .list_users()
        .unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].team_id.as_ref().map(|team| team.as_str()), Some("5"));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
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
fn repositories_refuse_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    match SqlitePostRepository::try_new(&conn) {
        Err(RepoError::InvalidData(message)) => assert!(message.contains("posts")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("repository accepted an unmigrated connection"),
    }
}

#[test]
fn user_upsert_replaces_profile_and_expertise() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();

    let mut ada = User::new("u1", "Ada");
    ada.expertise = vec!["Finance".to_string(), "Marketing".to_string()];
    users.upsert_user(&ada).unwrap();

    ada.display_name = "Ada L.".to_string();
    ada.expertise = vec!["UI/UX Design".to_string()];
    users.upsert_user(&ada.clone().with_team("7")).unwrap();
    users.upsert_user(&User::new("u0", "bea")).unwrap();

    let listed = users.list_users().unwrap();
    let names: Vec<&str> = listed.iter().map(|user| user.display_name.as_str()).collect();
    assert_eq!(names, vec!["Ada L.", "bea"]);
    assert_eq!(listed[0].expertise, vec!["UI/UX Design"]);
    assert_eq!(listed[0].team_id.as_ref().map(|team| team.as_str()), Some("7"));
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
