//! # Schema
//!
//! DDL for the `users` table. The server assumes the table already exists;
//! this is only invoked by `usermgmt init` and by tests.

use rusqlite::Connection;
use tracing::info;

use super::errors::StorageResult;

/// `AUTOINCREMENT` keeps SQLite from handing out the id of a deleted row again.
pub const CREATE_USERS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    password TEXT NOT NULL
)";

/// Create the `users` table if it does not exist yet
pub fn ensure_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(CREATE_USERS_TABLE)?;
    info!("users table ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'users'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
