//! # User Model
//!
//! The single entity held by the `users` table.

use rusqlite::Row;
use serde::Serialize;

/// A stored user row
///
/// Passwords are stored and compared as plaintext. This is inherited from the
/// system this service replaces and is a known security gap, not a design goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Assigned by SQLite on insert, never reused
    pub id: i64,

    pub name: String,

    pub email: String,

    /// Plaintext password (never serialized into responses)
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Column list matching [`User::from_row`]
    pub const COLUMNS: &'static str = "id, name, email, password";

    /// Build a user from a row selected with [`User::COLUMNS`]
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_omits_password() {
        let user = User {
            id: 7,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret123".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["email"], "ada@example.com");
        assert!(json.get("password").is_none());
        assert!(!json.to_string().contains("secret123"));
    }
}
