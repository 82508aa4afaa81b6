use std::{
    net::SocketAddr,
    path::PathBuf,
};

use starlookup_server::lookup::LookupConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendKind {
    Sqlite,
    Postgres,
}

/// Validated configuration, built once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub listen: SocketAddr,
    pub database: DatabaseConfig,
    pub lookup: LookupConfig,
}

#[derive(Clone, Debug)]
pub enum DatabaseConfig {
    Sqlite {
        path: PathBuf,
        table: String,
    },
    Postgres {
        host: String,
        database: String,
        user: String,
        password: String,
        table: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("database type is required (sqlite or postgres)")]
    MissingBackend,

    #[error("database is required")]
    MissingDatabase,

    #[error("port must be between 1 and 65535")]
    InvalidPort,

    #[error("postgres needs a database user and password")]
    MissingCredentials,

    #[error("sqlite database file does not exist: {}", .0.display())]
    DatabaseNotFound(PathBuf),

    #[error("table name must be a plain SQL identifier: {0:?}")]
    InvalidTable(String),

    #[error("queue capacity must be at least 1")]
    InvalidQueueCapacity,

    #[error("lookup timeout must be at least 1 ms")]
    InvalidLookupTimeout,
}
