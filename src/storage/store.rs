//! # User Store
//!
//! Parameterized statements over the `users` table.
//!
//! A `UserStore` owns exactly one SQLite connection. It is created per request
//! by [`Database::connect`](super::Database::connect) and the connection is
//! closed when the store is dropped.
//!
//! Id arguments accept any bindable value. Text ids are compared under the
//! column's INTEGER affinity, so `"7"` and `"7.0"` both match row 7 and text
//! that is not numeric matches nothing.

use rusqlite::{params, Connection, OptionalExtension, ToSql};

use super::errors::StorageResult;
use super::user::User;

/// Data access for the `users` table
pub struct UserStore {
    conn: Connection,
}

impl UserStore {
    /// Wrap an open connection
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrow the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Every row, in the order SQLite returns them
    pub fn list_all(&self) -> StorageResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users", User::COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let users = stmt
            .query_map([], User::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Exact match on the primary key
    pub fn get_by_id<I: ToSql>(&self, id: I) -> StorageResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?1", User::COLUMNS);
        let user = self
            .conn
            .query_row(&sql, params![id], User::from_row)
            .optional()?;
        Ok(user)
    }

    /// Insert a new row and return the id SQLite assigned to it
    pub fn insert(&self, name: &str, email: &str, password: &str) -> StorageResult<i64> {
        self.conn.execute(
            "INSERT INTO users (name, email, password) VALUES (?1, ?2, ?3)",
            params![name, email, password],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Overwrite name and email. A missing id changes nothing and is not an error.
    ///
    /// Returns the number of rows changed.
    pub fn update<I: ToSql>(&self, id: I, name: &str, email: &str) -> StorageResult<usize> {
        let changed = self.conn.execute(
            "UPDATE users SET name = ?1, email = ?2 WHERE id = ?3",
            params![name, email, id],
        )?;
        Ok(changed)
    }

    /// Remove a row. A missing id is not an error.
    ///
    /// Returns the number of rows removed.
    pub fn delete<I: ToSql>(&self, id: I) -> StorageResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1", params![id])?;
        Ok(removed)
    }

    /// Users whose name contains `fragment` anywhere.
    ///
    /// Uses SQLite `LIKE`, so matching is ASCII case-insensitive.
    pub fn search_by_name(&self, fragment: &str) -> StorageResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users WHERE name LIKE ?1", User::COLUMNS);
        let pattern = format!("%{}%", fragment);
        let mut stmt = self.conn.prepare(&sql)?;
        let users = stmt
            .query_map(params![pattern], User::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Exact match on both email and plaintext password
    pub fn authenticate(&self, email: &str, password: &str) -> StorageResult<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE email = ?1 AND password = ?2",
            User::COLUMNS
        );
        let user = self
            .conn
            .query_row(&sql, params![email, password], User::from_row)
            .optional()?;
        Ok(user)
    }
}
