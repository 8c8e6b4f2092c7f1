//! Process-level helpers.

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "users_api=debug,tower_http=debug,info";

/// Build the log filter from `--verbose` and the `RUST_LOG` directives.
///
/// Unparseable directives fall back to `info`.
pub fn log_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_FILTER);
    }

    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Resolve when the process receives Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
