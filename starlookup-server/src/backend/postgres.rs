use sqlx::{
    postgres::{
        PgConnectOptions,
        PgConnection,
        PgStatement,
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
pub struct PostgresConnector {
    options: PgConnectOptions,
    sql: String,
}

impl PostgresConnector {
    pub fn new(options: PgConnectOptions, table: &str) -> Result<Self, Error> {
        validate_table_name(table)?;

        Ok(Self {
            options,
            sql: lookup_sql(table),
        })
    }
}

impl Connector for PostgresConnector {
    type Backend = PostgresBackend;

    async fn prepare(&self) -> Result<PostgresBackend, Error> {
        tracing::debug!(
            host = self.options.get_host(),
            database = ?self.options.get_database(),
            "connecting to postgres"
        );

        let mut connection = self.options.connect().await?;
        let statement = connection.prepare(&self.sql).await?;
        let statement = Statement::to_owned(&statement);

        Ok(PostgresBackend {
            connection,
            statement,
        })
    }
}

#[derive(Debug)]
pub struct PostgresBackend {
    connection: PgConnection,
    statement: PgStatement<'static>,
}

impl Backend for PostgresBackend {
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
            name::text AS name,
            x::float8 AS x,
            y::float8 AS y,
            z::float8 AS z,
            color_index::float8 AS color_index,
            abs_magnitude::float8 AS abs_magnitude,
            spectrum::text AS spectrum
        FROM {table}
        WHERE star_id = $1::int8
        "#
    )
}
