//! BioTime Gateway Server
//!
//! Local REST surface in front of a BioTime installation:
//! - Areas: CRUD plus a best-effort terminal re-sync after writes
//! - Employees: plain CRUD passthrough
//! - Devices: terminal reads and sync probes
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BT_API_PORT` | `8080` | HTTP API port |
//! | `BIOTIME_BASE_URL` | `http://localhost:8081` | BioTime base URL |
//! | `BIOTIME_USERNAME` | `admin` | BioTime API username |
//! | `BIOTIME_PASSWORD` | - | BioTime API password |
//! | `RUST_LOG` | `info` | Log level |

use std::sync::Arc;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use bt_api::{gateway_router, GatewayApiDoc};
use bt_client::{BioTimeClient, BioTimeConfig};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting BioTime Gateway Server");

    // Configuration from environment
    let api_port: u16 = env_or_parse("BT_API_PORT", 8080);
    let base_url = env_or("BIOTIME_BASE_URL", "http://localhost:8081");
    let username = env_or("BIOTIME_USERNAME", "admin");
    let password = env_or("BIOTIME_PASSWORD", "");

    info!("Proxying to BioTime at {}", base_url);
    let client = BioTimeClient::new(BioTimeConfig::new(base_url, username, password))?;

    let app = Router::new()
        .merge(gateway_router(Arc::new(client)))
        .route("/health", get(health_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", GatewayApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let api_addr = format!("0.0.0.0:{}", api_port);
    info!("API server listening on http://{}", api_addr);

    let listener = TcpListener::bind(&api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("BioTime Gateway Server shutdown complete");
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
