//! # HTTP Server Module
//!
//! Axum server exposing the user management API.
//!
//! # Endpoints
//!
//! - `GET /` - Service banner
//! - `GET /users`, `POST /users` - List and create users
//! - `GET|PUT|DELETE /user/{id}` - Read, update and delete one user
//! - `GET /search?name=` - Substring search on user names
//! - `POST /login` - Email/password check

pub mod config;
pub mod errors;
pub mod server;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
