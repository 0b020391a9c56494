//! HTTP server bootstrap.
//!
//! Process-wide concerns (bind address, CORS) are explicit configuration
//! passed into [`start`] rather than ambient global state.

use axum::Router;
use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Allow any origin (local development default).
    Any,
    /// Allow only the listed origins.
    Origins(Vec<String>),
}

impl AllowedOrigins {
    /// Builds the CORS layer for these origins.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidOrigin`] when a listed origin is not a
    /// valid header value.
    pub fn to_cors_layer(&self) -> Result<CorsLayer, ServerError> {
        match self {
            Self::Any => Ok(CorsLayer::permissive()),
            Self::Origins(origins) => {
                let parsed = origins
                    .iter()
                    .map(|origin| {
                        HeaderValue::from_str(origin)
                            .map_err(|_| ServerError::InvalidOrigin(origin.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CorsLayer::new()
                    .allow_origin(AllowOrigin::list(parsed))
                    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]))
            }
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind; port 0 picks an ephemeral port.
    pub bind: SocketAddr,
    /// Origins allowed by the CORS layer.
    pub allowed_origins: AllowedOrigins,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            allowed_origins: AllowedOrigins::Any,
        }
    }
}

/// Errors raised while bootstrapping the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configured CORS origin is not a valid header value.
    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),

    /// Binding or inspecting the listener failed.
    #[error("failed to bind server socket: {0}")]
    Bind(#[source] std::io::Error),
}

/// Handle to a running server.
pub struct ServerHandle {
    local_addr: SocketAddr,
    server: JoinHandle<()>,
}

impl ServerHandle {
    /// Returns the bound local address.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Waits for the serve loop to finish. It runs until the process shuts
    /// down, so this is effectively "serve forever" for the binary.
    pub async fn join(self) {
        if let Err(err) = self.server.await {
            tracing::error!(error = %err, "server task terminated abnormally");
        }
    }
}

/// Binds the configured address and starts serving the router.
///
/// # Errors
///
/// Returns [`ServerError`] when the CORS configuration is invalid or the
/// socket cannot be bound.
pub async fn start(config: ServerConfig, router: Router) -> Result<ServerHandle, ServerError> {
    let cors = config.allowed_origins.to_cors_layer()?;
    let app = router.layer(cors);

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(ServerError::Bind)?;
    let local_addr = listener.local_addr().map_err(ServerError::Bind)?;

    tracing::info!(%local_addr, "task service listening");

    let server = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!(error = %err, "serve loop failed");
        }
    });

    Ok(ServerHandle { local_addr, server })
}
