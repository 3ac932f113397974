//! Catalog Backend
//!
//! REST API for an e-commerce catalog of categories, products and tags.
//!
//! Layered architecture:
//! - domain: Core entities and payloads
//! - repository: Data access abstractions and SQLite implementations
//! - routes: axum handlers

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
mod routes;

use config::Config;
use error::StartupError;
use repository::{init_db, seed_db, CategoryRepository, DbState, ProductRepository, TagRepository};

/// Application state shared across handlers
///
/// Every repository gets its handle here; handlers never reach for a global.
pub struct AppState {
    pub categories: CategoryRepository,
    pub tags: TagRepository,
    pub products: ProductRepository,
}

impl AppState {
    pub fn new(db: &DbState) -> Arc<Self> {
        Arc::new(Self {
            categories: CategoryRepository::new(db.connection()),
            tags: TagRepository::new(db.connection()),
            products: ProductRepository::new(db.connection()),
        })
    }
}

/// The full HTTP application: routes plus CORS and request tracing
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn start_server() -> Result<(), StartupError> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    info!("Initializing database...");
    let db = init_db(&config.database_path).await?;
    if config.seed_database {
        seed_db(&db).await?;
    }
    let state = AppState::new(&db);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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
}
