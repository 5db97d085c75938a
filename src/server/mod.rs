//! HTTP surface of the relay.
//!
//! Routes, the middleware stack (CORS, request tracing, panic catching) and
//! the listener with graceful shutdown.

pub mod error;
pub mod handlers;

use crate::config::RelayConfig;
use crate::core::relay::{ContactRelay, CONTACT_ENDPOINT};
use crate::utils::error::{RelayError, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub fn router(relay: Arc<ContactRelay>, config: &RelayConfig) -> Result<Router> {
    let routes = Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route(CONTACT_ENDPOINT, post(handlers::contact))
        .with_state(relay);

    with_middleware(routes, &config.allowed_origins)
}

/// Wraps any router in the relay's middleware stack.
pub fn with_middleware(router: Router, allowed_origins: &[String]) -> Result<Router> {
    Ok(router
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(cors_layer(allowed_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// Fixed origin allow-list with credentials. Request headers are mirrored,
/// since a wildcard is not allowed together with credentials.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| RelayError::InvalidConfigValueError {
                field: "allowed_origins".to_string(),
                value: origin.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub async fn serve(config: &RelayConfig, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
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

    tracing::info!("Shutdown signal received");
}
