//! Serialized star lookups.
//!
//! All database access goes through a single worker task that owns the
//! connection. HTTP handlers talk to it through a [`Gateway`], which queues
//! a request together with a private reply channel and waits for the
//! answer. A supervisor reconnects and restarts the worker after database
//! errors.

mod gateway;
mod supervisor;
mod worker;

use std::time::Duration;

use starlookup_protocol::model::star::StarId;
use tokio::{
    sync::{
        mpsc,
        oneshot,
    },
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

pub use self::gateway::Gateway;
use self::supervisor::Supervisor;
use crate::{
    backend::Connector,
    error::{
        Error,
        LookupError,
    },
    model::Lookup,
};

#[derive(Clone, Debug)]
pub struct LookupConfig {
    /// How many requests can wait for the worker before callers block.
    pub queue_capacity: usize,

    /// Default deadline for [`Gateway::lookup`].
    pub timeout: Duration,

    /// Pause before reconnecting after a database error.
    pub restart_backoff: Duration,

    /// Give up after this many restarts. `None` retries forever.
    pub max_restarts: Option<usize>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 100,
            timeout: Duration::from_secs(5),
            restart_backoff: Duration::from_secs(1),
            max_restarts: None,
        }
    }
}

#[derive(Debug)]
struct Request {
    id: StarId,
    tx_reply: oneshot::Sender<Result<Lookup, LookupError>>,
}

/// Prepares the backend and spawns the supervised worker.
///
/// The backend is prepared before anything is spawned, so a bad database
/// configuration is reported here instead of on the first request. The
/// returned task finishes when `shutdown` is cancelled, when all gateways
/// are dropped, or with an error once the restart budget is used up.
pub async fn start<C: Connector>(
    connector: C,
    config: &LookupConfig,
    shutdown: CancellationToken,
) -> Result<(Gateway, JoinHandle<Result<(), Error>>), Error> {
    let backend = connector.prepare().await?;

    let (tx_request, rx_request) = mpsc::channel(config.queue_capacity);

    let supervisor = Supervisor {
        connector,
        rx_request,
        restart_backoff: config.restart_backoff,
        max_restarts: config.max_restarts,
        shutdown,
    };
    let join_handle = tokio::spawn(supervisor.run(backend));

    Ok((Gateway::new(tx_request, config.timeout), join_handle))
}
