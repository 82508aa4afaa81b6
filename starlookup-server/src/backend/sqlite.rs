use std::path::Path;

use sqlx::{
    sqlite::{
        SqliteConnectOptions,
        SqliteConnection,
        SqliteStatement,
    },
    ConnectOptions,
    Executor,
    Statement,
};
use starlookup_protocol::model::star::StarId;

use crate::{
    backend::{
        validate_table_name,
        Backend,
        Connector,
    },
    error::Error,
    model::NullableStar,
};

#[derive(Clone, Debug)]
pub struct SqliteConnector {
    options: SqliteConnectOptions,
    sql: String,
}

impl SqliteConnector {
    /// Connects read-only to the database file at `path`.
    pub fn new(path: impl AsRef<Path>, table: &str) -> Result<Self, Error> {
        validate_table_name(table)?;

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);

        Ok(Self {
            options,
            sql: lookup_sql(table),
        })
    }
}

impl Connector for SqliteConnector {
    type Backend = SqliteBackend;

    async fn prepare(&self) -> Result<SqliteBackend, Error> {
        tracing::debug!(filename = %self.options.get_filename().display(), "opening sqlite database");

        let mut connection = self.options.connect().await?;
        let statement = connection.prepare(&self.sql).await?;
        let statement = Statement::to_owned(&statement);

        Ok(SqliteBackend {
            connection,
            statement,
        })
    }
}

#[derive(Debug)]
pub struct SqliteBackend {
    connection: SqliteConnection,
    statement: SqliteStatement<'static>,
}

impl Backend for SqliteBackend {
    async fn query_by_id(&mut self, id: StarId) -> Result<Option<NullableStar>, Error> {
        let row = self
            .statement
            .query_as::<NullableStar>()
            .bind(i64::from(id))
            .fetch_optional(&mut self.connection)
            .await?;
        Ok(row)
    }
}

fn lookup_sql(table: &str) -> String {
    format!(
        r#"
        SELECT
            name,
            CAST(x AS REAL) AS x,
            CAST(y AS REAL) AS y,
            CAST(z AS REAL) AS z,
            CAST(color_index AS REAL) AS color_index,
            CAST(abs_magnitude AS REAL) AS abs_magnitude,
            spectrum
        FROM {table}
        WHERE star_id = ?1
        "#
    )
}
