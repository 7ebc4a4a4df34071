//! Command line and environment configuration for the HTTP server.

use std::env;
use std::io;
use std::net::SocketAddr;

use clap::Parser;

/// `rentals-backend` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rentals-backend",
    about = "HTTP backend tracking construction plate rentals",
    version
)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[arg(long = "bind-addr", value_name = "addr", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    #[arg(long = "pool-size", value_name = "n", default_value_t = 10)]
    pub pool_size: u32,
}

impl ServerConfig {
    /// Resolve the database URL from the flag or the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when neither `--database-url` nor `DATABASE_URL`
    /// is provided.
    pub fn resolve_database_url(&self) -> io::Result<String> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }
        env::var("DATABASE_URL").map_err(|_| {
            io::Error::other("database URL missing: pass --database-url or set DATABASE_URL")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_bind_all_interfaces_on_8080() {
        let config = ServerConfig::try_parse_from(["rentals-backend"]).expect("parse");

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(config.pool_size, 10);
        assert!(config.database_url.is_none());
    }

    #[rstest]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "rentals-backend",
            "--bind-addr",
            "127.0.0.1:9000",
            "--database-url",
            "postgres://localhost/rentals",
            "--pool-size",
            "4",
        ])
        .expect("parse");

        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().expect("addr"));
        assert_eq!(config.pool_size, 4);
        assert_eq!(
            config.resolve_database_url().expect("url"),
            "postgres://localhost/rentals"
        );
    }

    #[rstest]
    fn explicit_database_url_wins_over_environment() {
        let config = ServerConfig::try_parse_from([
            "rentals-backend",
            "--database-url",
            "postgres://db.internal/rentals",
        ])
        .expect("parse");

        assert_eq!(
            config.resolve_database_url().expect("url"),
            "postgres://db.internal/rentals"
        );
    }
}
