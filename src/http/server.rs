//! HTTP server for the form-submission endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::config::RateLimitingConfig;
use crate::error::Result;
use crate::mail::Mailer;
use crate::ratelimit::RateLimiter;

use super::handlers;

/// Shared state injected into every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The per-process rate limiter
    pub limiter: Arc<RateLimiter>,
    /// Email delivery seam
    pub mailer: Arc<dyn Mailer>,
    /// Quotas and window applied by the handlers
    pub limits: RateLimitingConfig,
}

/// HTTP server for the public form endpoints.
pub struct HttpServer {
    /// Address to bind to
    addr: SocketAddr,
    /// Handler state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server.
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self { addr, state }
    }

    /// Build the router over the given state.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/contact", post(handlers::contact))
            .route("/api/pricing", post(handlers::pricing))
            .with_state(state)
    }

    /// Start the HTTP server with graceful shutdown.
    ///
    /// The server will shut down when the provided signal resolves.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = Self::router(self.state);

        info!(
            addr = %self.addr,
            "Starting HTTP server for form endpoints"
        );

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::LogMailer;

    #[test]
    fn test_server_creation() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let state = AppState {
            limiter: Arc::new(RateLimiter::new()),
            mailer: Arc::new(LogMailer),
            limits: RateLimitingConfig::default(),
        };
        let _server = HttpServer::new(addr, state);
    }
}
