//! CLI command implementations

use std::path::{Path, PathBuf};

use tracing::info;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::logging::{init_logging, DEFAULT_LOG_LEVEL};
use crate::storage::Database;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    init_logging(DEFAULT_LOG_LEVEL);
    let cli = Cli::parse_args();
    run_command(cli.into_command())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            host,
            port,
            database,
        } => serve(host, port, database),
        Command::Init { database } => init(&database),
    }
}

/// Create the users table in `database`
pub fn init(database: &Path) -> CliResult<()> {
    let db = Database::new(database);
    db.init_schema()?;
    info!(database = %database.display(), "database initialized");
    Ok(())
}

/// Serve the HTTP API until the process is terminated
pub fn serve(host: String, port: u16, database: PathBuf) -> CliResult<()> {
    let config = HttpServerConfig {
        host,
        port,
        database_path: database,
    };
    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_users_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.db");

        run_command(Command::Init {
            database: path.clone(),
        })
        .unwrap();

        let store = Database::new(&path).connect().unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_init_fails_for_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("users.db");

        let err = init(&path).unwrap_err();
        assert_eq!(err.code_str(), "USERMGMT_STORAGE_ERROR");
    }

    #[test]
    fn test_serve_reports_bad_address() {
        let dir = TempDir::new().unwrap();
        let err = serve(
            "not a host".to_string(),
            5009,
            dir.path().join("users.db"),
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "USERMGMT_SERVE_FAILED");
    }
}
