use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    backend::Connector,
    error::Error,
    lookup::{
        worker::Worker,
        Request,
    },
};

/// Restarts the lookup worker after database errors.
///
/// Owns the request queue, so gateways stay valid across restarts. Once the
/// supervisor returns the queue is closed and every lookup fails with
/// [`LookupError::Unavailable`](crate::error::LookupError::Unavailable).
pub(super) struct Supervisor<C> {
    pub connector: C,
    pub rx_request: mpsc::Receiver<Request>,
    pub restart_backoff: Duration,
    pub max_restarts: Option<usize>,
    pub shutdown: CancellationToken,
}

impl<C: Connector> Supervisor<C> {
    pub async fn run(mut self, backend: C::Backend) -> Result<(), Error> {
        let mut worker = Worker::new(backend);
        let mut restarts = 0;

        tracing::info!("lookup worker started");

        loop {
            let result = tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("lookup worker shutting down");
                    return Ok(());
                }
                result = worker.run(&mut self.rx_request) => result,
            };

            let mut error = match result {
                Ok(()) => {
                    tracing::debug!("all gateways dropped, stopping lookup worker");
                    return Ok(());
                }
                Err(error) => error,
            };

            worker = loop {
                tracing::error!(?error, restarts, "lookup worker failed");

                if self.max_restarts.is_some_and(|max| restarts >= max) {
                    return Err(Error::RestartsExhausted {
                        restarts,
                        source: Box::new(error),
                    });
                }
                restarts += 1;

                tokio::select! {
                    _ = self.shutdown.cancelled() => return Ok(()),
                    _ = tokio::time::sleep(self.restart_backoff) => {}
                }

                match self.connector.prepare().await {
                    Ok(backend) => {
                        tracing::info!(restarts, "lookup worker restarted");
                        break Worker::new(backend);
                    }
                    Err(e) => error = e,
                }
            };
        }
    }
}
