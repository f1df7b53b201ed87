//! Vitrina API Server implementation
//!
//! HTTP JSON API using Axum over a single shared catalog controller.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handlers;
use crate::app::CatalogApp;
use crate::cart::FileStorage;
use crate::config::CatalogConfig;

/// API Server configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub version: String,
    pub app: RwLock<CatalogApp<FileStorage>>,
}

impl AppState {
    pub fn new(app: CatalogApp<FileStorage>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            app: RwLock::new(app),
        }
    }
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and info endpoints
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Catalog
        .route("/api/v1/catalog", get(handlers::catalog))
        .route("/api/v1/products", get(handlers::products))
        .route("/api/v1/reload", post(handlers::reload))
        // Cart
        .route("/api/v1/cart", get(handlers::cart))
        .route("/api/v1/cart/add", post(handlers::cart_add))
        .route("/api/v1/cart/increment", post(handlers::cart_increment))
        .route("/api/v1/cart/decrement", post(handlers::cart_decrement))
        .route("/api/v1/cart/remove", post(handlers::cart_remove))
        .route("/api/v1/order", get(handlers::order))
        // State and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig, catalog_config: CatalogConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrina_server=info,vitrina=info,tower_http=info".into()),
        )
        .init();

    let app = CatalogApp::open(catalog_config).await?;
    info!(
        products = app.catalog().len(),
        categories = app.catalog().categories.len(),
        "catalog loaded"
    );
    let state = Arc::new(AppState::new(app));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("🛍️ Vitrina API Server starting on http://{}", addr);
    info!("   Endpoints: /api/v1/catalog, /api/v1/products, /api/v1/cart, /api/v1/order, /api/v1/reload");
    info!("   Health: /health, Version: /version");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Vitrina API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {}", e);
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
                warn!("failed to install signal handler: {}", e);
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

    info!("Shutdown signal received, stopping server...");
}
