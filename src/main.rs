use axum::{
    extract::State, handler::HandlerWithoutStateExt, response::IntoResponse, routing::get, Json,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod artifacts;
mod middleware;
mod models;
mod origin;
mod pages;

use models::{HealthResponse, MemoryUsage, ServerConfig};

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ota_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let addr = config.bind_addr();

    if !config.public_dir.is_dir() {
        tracing::warn!(
            "Public directory {} does not exist - artifact routes will return 404",
            config.public_dir.display()
        );
    }

    info!("{} listening on {}", config.server_label, addr);
    info!("Local URL: http://localhost:{}", config.port);
    info!("Serving files from: {}", config.public_dir.display());
    info!("Available endpoints:");
    info!("  GET /              -> Home page");
    info!("  GET /version.txt   -> Firmware version");
    info!("  GET /firmware.bin  -> Firmware binary");
    info!("  GET /firmware.md5  -> MD5 checksum");
    info!("  GET /api/version   -> JSON version info");
    info!("  GET /health        -> Health check");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app(config).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

/// Build the full router over the given configuration
pub fn app(config: ServerConfig) -> Router {
    let static_files = ServeDir::new(&config.public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(pages::not_found.into_service());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(pages::index).fallback(pages::not_found))
        .route("/health", get(health).fallback(pages::not_found))
        .merge(artifacts::routes())
        .nest("/api", api::routes())
        .fallback_service(static_files)
        .layer(axum::middleware::from_fn(middleware::hidden_files_middleware))
        .layer(axum::middleware::from_fn(middleware::request_log_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp: models::iso_timestamp(),
        uptime: state.config.uptime_secs(),
        memory: MemoryUsage::snapshot(),
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
