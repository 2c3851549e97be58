//! usermgmt - A small user management HTTP service
//!
//! JSON over HTTP in front of a single SQLite `users` table.

pub mod cli;
pub mod http_server;
pub mod logging;
pub mod storage;
pub mod validation;
