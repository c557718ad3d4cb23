use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber;

use formgate::config::FormgateConfig;
use formgate::http::{AppState, HttpServer};
use formgate::mail::LogMailer;
use formgate::ratelimit::RateLimiter;

#[derive(Parser, Debug)]
#[command(name = "formgate")]
#[command(about = "Request throttling service for form-submission endpoints")]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Address to listen on, overriding the configuration file
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .init();

    info!("Starting Formgate");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let mut config = match args.config.as_deref() {
        Some(path) => FormgateConfig::from_file(path)?,
        None => FormgateConfig::default(),
    };
    if let Some(listen) = args.listen {
        config.server.listen_addr = listen;
    }
    info!(listen_addr = %config.server.listen_addr, "Configuration loaded");

    // One limiter instance per process; quotas are therefore per process.
    // Running multiple workers (or a per-request serverless runtime, which
    // recreates this map on every cold start) multiplies or voids the
    // effective limit.
    let limiter = Arc::new(RateLimiter::new());
    let _sweeper = Arc::clone(&limiter).start_sweeper(config.rate_limiting.sweep_interval());
    info!(
        contact_limit = config.rate_limiting.contact_limit,
        pricing_limit = config.rate_limiting.pricing_limit,
        window_ms = config.rate_limiting.window_ms,
        "Rate limiter initialized"
    );

    let state = AppState {
        limiter,
        mailer: Arc::new(LogMailer),
        limits: config.rate_limiting.clone(),
    };

    let server = HttpServer::new(config.server.listen_addr, state);
    server.serve_with_shutdown(shutdown_signal()).await?;

    info!("Formgate stopped");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
