#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("sqlx error")]
    Sqlx(#[from] sqlx::Error),

    #[error("io error")]
    Io(#[from] std::io::Error),

    #[error("failed to encode response")]
    Encoding(#[from] serde_json::Error),

    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("lookup worker gave up after {restarts} restarts")]
    RestartsExhausted {
        restarts: usize,
        #[source]
        source: Box<Error>,
    },
}

/// Why a lookup didn't produce a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The worker is gone, restarting, or failed while serving this request.
    #[error("star database unavailable")]
    Unavailable,

    #[error("star lookup timed out")]
    Timeout,
}
