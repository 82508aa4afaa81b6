//! Database backends for the lookup worker.
//!
//! A backend is one open connection with the lookup statement already
//! prepared. The worker is its only user, so backends don't need to be
//! shareable.

pub mod postgres;
pub mod sqlite;

use std::future::Future;

use starlookup_protocol::model::star::StarId;

pub use self::{
    postgres::PostgresConnector,
    sqlite::SqliteConnector,
};
use crate::{
    error::Error,
    model::NullableStar,
};

/// Default catalog table, as created by the HYG import.
pub const DEFAULT_TABLE: &str = "hygxyz";

/// Opens a connection and prepares the lookup statement.
///
/// Called once at startup and again every time the worker is restarted
/// after a database error.
pub trait Connector: Send + Sync + 'static {
    type Backend: Backend;

    fn prepare(&self) -> impl Future<Output = Result<Self::Backend, Error>> + Send;
}

pub trait Backend: Send + 'static {
    /// Runs the prepared statement for `id`.
    ///
    /// Returns `None` if no row matches. Only the first row is read.
    fn query_by_id(
        &mut self,
        id: StarId,
    ) -> impl Future<Output = Result<Option<NullableStar>, Error>> + Send;
}

/// Checks that `table` can be pasted into a statement as-is.
pub fn validate_table_name(table: &str) -> Result<(), Error> {
    let mut chars = table.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    }
    else {
        Err(Error::InvalidTableName(table.to_owned()))
    }
}
