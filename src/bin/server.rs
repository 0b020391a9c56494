//! Task service entry point.
//!
//! Configuration comes from the environment:
//!
//! - `DATABASE_URL` (required): `PostgreSQL` connection string.
//! - `BIND_ADDR` (optional): socket address to listen on, defaulting to
//!   `127.0.0.1:8080`.
//! - `ALLOWED_ORIGINS` (optional): comma-separated CORS origin list;
//!   unset allows any origin.
//! - `RUST_LOG` (optional): tracing filter, defaulting to `info`.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tasklist::http::{AllowedOrigins, AppState, ServerConfig, build_router, start};
use tasklist::task::adapters::postgres::PostgresTaskRepository;
use tasklist::task::services::TaskService;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while bootstrapping the process.
#[derive(Debug, Error)]
enum BootstrapError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
    #[error("invalid bind address '{0}'")]
    InvalidBindAddr(String),
    #[error("failed to build database pool: {0}")]
    Pool(#[source] diesel::r2d2::PoolError),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    init_tracing();

    let database_url =
        env::var("DATABASE_URL").map_err(|_| BootstrapError::MissingEnv("DATABASE_URL"))?;
    let config = server_config_from_env()?;

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().build(manager).map_err(BootstrapError::Pool)?;

    let repository = Arc::new(PostgresTaskRepository::new(pool));
    let service = Arc::new(TaskService::new(repository, Arc::new(DefaultClock)));
    let router = build_router(AppState::new(service));

    let handle = start(config, router).await?;
    handle.join().await;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn server_config_from_env() -> Result<ServerConfig, BootstrapError> {
    let bind = env::var("BIND_ADDR").map_or_else(
        |_| Ok(ServerConfig::default().bind),
        |raw| {
            raw.parse::<SocketAddr>()
                .map_err(|_| BootstrapError::InvalidBindAddr(raw))
        },
    )?;

    let allowed_origins = env::var("ALLOWED_ORIGINS").map_or(
        AllowedOrigins::Any,
        |raw| {
            AllowedOrigins::Origins(
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(ToOwned::to_owned)
                    .collect(),
            )
        },
    );

    Ok(ServerConfig {
        bind,
        allowed_origins,
    })
}
