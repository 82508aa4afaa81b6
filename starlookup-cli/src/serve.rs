use std::{
    net::{
        IpAddr,
        Ipv4Addr,
        SocketAddr,
    },
    path::PathBuf,
    time::Duration,
};

use color_eyre::eyre::Error;
use sqlx::postgres::PgConnectOptions;
use starlookup_server::{
    backend::{
        validate_table_name,
        Connector,
        PostgresConnector,
        SqliteConnector,
        DEFAULT_TABLE,
    },
    lookup::{
        self,
        LookupConfig,
    },
    util::graceful_shutdown,
    Server,
};
use tokio_util::sync::CancellationToken;

use crate::config::{
    BackendKind,
    Config,
    ConfigError,
    DatabaseConfig,
};

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Database type
    #[arg(short = 't', long = "type", env = "STARLOOKUP_TYPE")]
    backend: Option<BackendKind>,

    /// Database: a file path for sqlite, a database name for postgres
    #[arg(short, long, env = "STARLOOKUP_DATABASE")]
    database: Option<String>,

    /// Database user (postgres)
    #[arg(short, long, env = "STARLOOKUP_USER")]
    user: Option<String>,

    /// Database password (postgres)
    #[arg(long, visible_alias = "pass", env = "STARLOOKUP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Database host (postgres)
    #[arg(long, env = "STARLOOKUP_HOST", default_value = "localhost")]
    host: String,

    /// HTTP serve port
    #[arg(short, long, env = "STARLOOKUP_PORT")]
    port: Option<u16>,

    /// Address to listen on
    #[arg(long, env = "STARLOOKUP_LISTEN", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    listen: IpAddr,

    /// Catalog table to look stars up in
    #[arg(long, env = "STARLOOKUP_TABLE", default_value = DEFAULT_TABLE)]
    table: String,

    /// Lookups that can be queued for the database before requests wait
    #[arg(long, default_value = "100")]
    queue_capacity: usize,

    /// How long a request waits for its lookup, in milliseconds
    #[arg(long, default_value = "5000")]
    lookup_timeout_ms: u64,

    /// Pause before reconnecting after a database error, in milliseconds
    #[arg(long, default_value = "1000")]
    restart_backoff_ms: u64,

    /// Stop reconnecting after this many database errors
    #[arg(long)]
    max_restarts: Option<usize>,
}

impl ServeOptions {
    pub fn config(&self) -> Result<Config, ConfigError> {
        let backend = self.backend.ok_or(ConfigError::MissingBackend)?;

        let database = self
            .database
            .clone()
            .filter(|database| !database.is_empty())
            .ok_or(ConfigError::MissingDatabase)?;

        let port = self
            .port
            .filter(|port| *port != 0)
            .ok_or(ConfigError::InvalidPort)?;

        validate_table_name(&self.table)
            .map_err(|_| ConfigError::InvalidTable(self.table.clone()))?;
        let table = self.table.clone();

        let database = match backend {
            BackendKind::Sqlite => {
                let path = PathBuf::from(database);
                if !path.exists() {
                    return Err(ConfigError::DatabaseNotFound(path));
                }
                DatabaseConfig::Sqlite { path, table }
            }
            BackendKind::Postgres => {
                let (Some(user), Some(password)) = (
                    self.user.clone().filter(|user| !user.is_empty()),
                    self.password.clone().filter(|password| !password.is_empty()),
                )
                else {
                    return Err(ConfigError::MissingCredentials);
                };
                DatabaseConfig::Postgres {
                    host: self.host.clone(),
                    database,
                    user,
                    password,
                    table,
                }
            }
        };

        if self.queue_capacity == 0 {
            return Err(ConfigError::InvalidQueueCapacity);
        }
        if self.lookup_timeout_ms == 0 {
            return Err(ConfigError::InvalidLookupTimeout);
        }

        Ok(Config {
            listen: SocketAddr::new(self.listen, port),
            database,
            lookup: LookupConfig {
                queue_capacity: self.queue_capacity,
                timeout: Duration::from_millis(self.lookup_timeout_ms),
                restart_backoff: Duration::from_millis(self.restart_backoff_ms),
                max_restarts: self.max_restarts,
            },
        })
    }
}

pub async fn run(config: &Config) -> Result<(), Error> {
    match &config.database {
        DatabaseConfig::Sqlite { path, table } => {
            tracing::info!(path = %path.display(), %table, "using sqlite");
            serve(SqliteConnector::new(path, table)?, config).await
        }
        DatabaseConfig::Postgres {
            host,
            database,
            user,
            password,
            table,
        } => {
            tracing::info!(%host, %database, %user, %table, "using postgres");
            let options = PgConnectOptions::new()
                .host(host)
                .database(database)
                .username(user)
                .password(password);
            serve(PostgresConnector::new(options, table)?, config).await
        }
    }
}

async fn serve<C: Connector>(connector: C, config: &Config) -> Result<(), Error> {
    let shutdown = CancellationToken::new();
    graceful_shutdown(shutdown.clone());

    let (gateway, worker) = lookup::start(connector, &config.lookup, shutdown.clone()).await?;

    tokio::spawn(async move {
        match worker.await {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                tracing::error!(?error, "lookup worker stopped, star lookups will fail");
            }
            Err(error) => tracing::error!(?error, "lookup worker panicked"),
        }
    });

    Server::new(gateway, shutdown).bind(config.listen).await?;

    Ok(())
}
