use tokio::signal;
use tracing::warn;

/// Resolves when the process is asked to stop; the server future is
/// raced against this in `main`.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())
            .expect("Failed to listen for SIGTERM");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("🛑 Ctrl+C received, shutting down the Developer Directory API...")
        },
        _ = terminate => {
            warn!("🛑 SIGTERM received, shutting down the Developer Directory API...");
        }
    }
}
