use std::future::pending;

use tracing::{info, warn};

use crate::scaffold::pretty::Pretty;

/// Resolves once the process is asked to stop. Never resolves if no signal
/// source can be installed.
pub async fn wait() {
    #[cfg(unix)]
    {
        use tokio::{
            select,
            signal::unix::{SignalKind, signal},
        };

        async fn wait_kind(kind: SignalKind, name: &str) {
            match signal(kind) {
                Ok(mut sig) => {
                    if sig.recv().await.is_some() {
                        info!(signal = name, "signal received");
                        return;
                    }
                    warn!(signal = name, "signal stream closed");
                }
                Err(err) => {
                    warn!(signal = name, err = ?Pretty(err), "create signal with error");
                }
            }
            pending().await
        }

        select! {
            _ = wait_kind(SignalKind::interrupt(), "SIGINT") => {}
            _ = wait_kind(SignalKind::terminate(), "SIGTERM") => {}
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("CTRL+C received"),
            Err(err) => {
                warn!(err = ?Pretty(err), "CTRL+C observer error");
                pending::<()>().await
            }
        }
    }
}
