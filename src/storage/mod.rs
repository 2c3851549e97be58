//! User storage backed by SQLite
//!
//! Owns the single `users` table and every statement issued against it.
//!
//! # Design Principles
//!
//! - One connection per request, closed on drop
//! - Every statement is parameterized
//! - Each write is committed on its own (SQLite autocommit)
//! - Schema creation is explicit (`usermgmt init`), never implicit on requests

mod database;
mod errors;
mod schema;
mod store;
mod user;

pub use database::Database;
pub use errors::{StorageError, StorageResult};
pub use schema::{ensure_schema, CREATE_USERS_TABLE};
pub use store::UserStore;
pub use user::User;
