use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves once the process is asked to stop (ctrl-c, or SIGTERM on unix).
/// In-flight requests are left to finish by `axum::serve`.
pub async fn shutdown_signal() {
    tokio::select! {
        () = interrupt() => info!("interrupt received, draining todo API"),
        () = terminate() => info!("SIGTERM received, draining todo API"),
    }
}

async fn interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "ctrl+c listener unavailable, relying on SIGTERM");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
        warn!("SIGTERM listener unavailable, relying on ctrl+c");
        return std::future::pending().await;
    };
    sigterm.recv().await;
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending().await
}
