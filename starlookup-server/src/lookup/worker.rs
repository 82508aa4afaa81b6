use starlookup_protocol::model::star::{
    Star,
    StarId,
};
use tokio::sync::mpsc;

use crate::{
    backend::Backend,
    error::{
        Error,
        LookupError,
    },
    lookup::Request,
    model::Lookup,
};

/// Sole owner of a database backend.
///
/// Requests are served one at a time, in the order they were queued.
pub(super) struct Worker<B> {
    backend: B,
}

impl<B: Backend> Worker<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Serves requests until every sender is gone.
    ///
    /// A database error is fatal for this worker: the request that caused
    /// it is answered with [`LookupError::Unavailable`] and the error is
    /// returned. Requests still in the queue stay there for whoever runs
    /// next.
    pub async fn run(&mut self, rx_request: &mut mpsc::Receiver<Request>) -> Result<(), Error> {
        while let Some(Request { id, tx_reply }) = rx_request.recv().await {
            if tx_reply.is_closed() {
                tracing::debug!(%id, "caller went away, skipping lookup");
                continue;
            }

            match self.lookup(id).await {
                Ok(lookup) => {
                    // the caller may have timed out in the meantime
                    let _ = tx_reply.send(Ok(lookup));
                }
                Err(error) => {
                    let _ = tx_reply.send(Err(LookupError::Unavailable));
                    return Err(error);
                }
            }
        }

        Ok(())
    }

    async fn lookup(&mut self, id: StarId) -> Result<Lookup, Error> {
        let lookup = match self.backend.query_by_id(id).await? {
            Some(row) => {
                Lookup::Found(Star {
                    id,
                    ..row.coerce()
                })
            }
            None => Lookup::NotFound(id),
        };

        tracing::debug!(%id, found = lookup.is_found(), "served lookup");

        Ok(lookup)
    }
}
