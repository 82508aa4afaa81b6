use std::time::Duration;

use starlookup_protocol::model::star::StarId;
use tokio::sync::{
    mpsc,
    oneshot,
};

use crate::{
    error::LookupError,
    lookup::Request,
    model::Lookup,
};

/// Handle for looking up stars through the lookup worker.
///
/// Cheap to clone. Every clone feeds the same worker queue.
#[derive(Clone, Debug)]
pub struct Gateway {
    tx_request: mpsc::Sender<Request>,
    timeout: Duration,
}

impl Gateway {
    pub(super) fn new(tx_request: mpsc::Sender<Request>, timeout: Duration) -> Self {
        Self {
            tx_request,
            timeout,
        }
    }

    /// Looks up a star, waiting at most for the configured timeout.
    pub async fn lookup(&self, id: StarId) -> Result<Lookup, LookupError> {
        self.lookup_with_timeout(id, self.timeout).await
    }

    /// Looks up a star, waiting at most `timeout`.
    ///
    /// The deadline covers both waiting for room in the queue and waiting
    /// for the reply. When it expires the reply channel is dropped, and the
    /// worker won't query the database for a request nobody waits on
    /// anymore.
    pub async fn lookup_with_timeout(
        &self,
        id: StarId,
        timeout: Duration,
    ) -> Result<Lookup, LookupError> {
        tokio::time::timeout(timeout, self.submit(id))
            .await
            .map_err(|_| {
                tracing::warn!(%id, ?timeout, "star lookup timed out");
                LookupError::Timeout
            })?
    }

    async fn submit(&self, id: StarId) -> Result<Lookup, LookupError> {
        let (tx_reply, rx_reply) = oneshot::channel();

        self.tx_request
            .send(Request { id, tx_reply })
            .await
            .map_err(|_| LookupError::Unavailable)?;

        rx_reply.await.map_err(|_| LookupError::Unavailable)?
    }
}
