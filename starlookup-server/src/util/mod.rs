use tokio_util::sync::CancellationToken;

/// Spawns a task that cancels `shutdown` once the process is asked to stop.
pub fn graceful_shutdown(shutdown: CancellationToken) {
    tokio::spawn(async move {
        let signal = stop_signal().await;
        tracing::info!(signal, "shutting down");
        shutdown.cancel();
    });
}

/// Waits for Ctrl-C or, on unix, SIGTERM and returns which one arrived.
pub async fn stop_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{
            signal,
            SignalKind,
        };

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => "ctrl-c",
                    _ = terminate.recv() => "sigterm",
                }
            }
            Err(error) => {
                tracing::warn!(?error, "can't listen for SIGTERM, only Ctrl-C stops the server");
                let _ = tokio::signal::ctrl_c().await;
                "ctrl-c"
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        "ctrl-c"
    }
}
