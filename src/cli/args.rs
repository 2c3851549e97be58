//! CLI argument definitions using clap
//!
//! Commands:
//! - usermgmt                  (same as `serve` with defaults)
//! - usermgmt serve [--host <host>] [--port <port>] [--database <path>]
//! - usermgmt init [--database <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// User management HTTP service
#[derive(Parser, Debug)]
#[command(name = "usermgmt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Serve the HTTP API until terminated
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind
        #[arg(long, default_value_t = 5009)]
        port: u16,

        /// SQLite database file
        #[arg(long, default_value = "users.db")]
        database: PathBuf,
    },

    /// Create the users table if it does not exist
    Init {
        /// SQLite database file
        #[arg(long, default_value = "users.db")]
        database: PathBuf,
    },
}

impl Command {
    /// `serve` with every flag at its default
    pub fn default_serve() -> Self {
        Command::Serve {
            host: "0.0.0.0".to_string(),
            port: 5009,
            database: PathBuf::from("users.db"),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The command to run; no subcommand means serve
    pub fn into_command(self) -> Command {
        self.command.unwrap_or_else(Command::default_serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_serves_with_defaults() {
        let cli = Cli::try_parse_from(["usermgmt"]).unwrap();
        assert_eq!(cli.into_command(), Command::default_serve());
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "usermgmt",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--database",
            "/tmp/test.db",
        ])
        .unwrap();

        assert_eq!(
            cli.into_command(),
            Command::Serve {
                host: "127.0.0.1".to_string(),
                port: 8080,
                database: PathBuf::from("/tmp/test.db"),
            }
        );
    }

    #[test]
    fn test_serve_defaults_match_default_serve() {
        let cli = Cli::try_parse_from(["usermgmt", "serve"]).unwrap();
        assert_eq!(cli.into_command(), Command::default_serve());
    }

    #[test]
    fn test_init_database_flag() {
        let cli = Cli::try_parse_from(["usermgmt", "init", "--database", "x.db"]).unwrap();
        assert_eq!(
            cli.into_command(),
            Command::Init {
                database: PathBuf::from("x.db"),
            }
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["usermgmt", "serve", "--port", "99999"]).is_err());
    }
}
