//! Interrupt handling and graceful shutdown.

use tokio::io::AsyncWrite;
use tracing::{info, warn};

use crate::session::SessionWriter;

/// Complete when the process is asked to stop (SIGINT, or SIGTERM on unix).
///
/// A signal source that cannot be installed is logged and never fires.
pub async fn interrupt() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for interrupt signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for terminate signal");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received interrupt signal"),
        () = terminate => info!("Received terminate signal"),
    }
}

/// Send one `QUIT :` and close the stream.
pub async fn shutdown<W: AsyncWrite + Unpin>(writer: &SessionWriter<W>) {
    writer.quit().await;
    writer.close().await;
}
