//! pulsegauge server binary.
//!
//! - `GET /metrics` : Prometheus text exposition of the registry
//! - `GET /login`   : per-client-IP login counter + greeting (unless `--no-login`)
//! - Background sampler publishing synthetic `cpu_percent` / `mem_used_percent`

use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulsegauge_core::error::{PulseError, Result};
use pulsegauge_server::{app_state::AppState, cli::Cli, router, sampler::ThreadRandom};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.code(), "pulsegauge failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = cli.resolve_config()?;
    let listen = cfg.server.listen_addr()?;
    let period = cfg.sampler.interval();

    let state = AppState::new(cfg)?;
    let sampler = state.sampler(ThreadRandom::new()).spawn(period);
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| PulseError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "pulsegauge listening");

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| PulseError::Internal(format!("server failed: {e}")));

    sampler.shutdown().await;
    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("signal received, starting graceful shutdown");
}
