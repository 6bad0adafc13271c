//! # Vendo API Server
//!
//! JSON REST server for the Vendo storefront.
//!
//! ## Startup Sequence
//! ```text
//! 1. Load .env (development convenience)
//! 2. Initialize tracing (RUST_LOG overrides the default filter)
//! 3. Load configuration from environment variables
//! 4. Connect to SQLite (WAL mode) and run pending migrations
//! 5. Seed the mock catalog if the products table is empty
//! 6. Build the router and serve until ctrl-c / SIGTERM
//! ```

mod config;
mod error;
mod routes;
mod seed;
mod state;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ApiConfig;
use crate::state::AppState;
use vendo_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    info!("Starting Vendo API server");

    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        db_path = %config.database_path.display(),
        "Configuration loaded"
    );

    // The database file lives in a subdirectory by default; make sure the
    // directory exists before SQLite tries to create the file.
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database connected and migrations applied");

    let seeded = seed::seed_if_empty(&db).await?;
    if seeded > 0 {
        info!(count = seeded, "Product catalog was empty, seeded mock data");
    }

    let state = AppState::new(db);

    let app = routes::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The storefront UI is served from a different origin
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "vendo-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Default: INFO overall, DEBUG for vendo crates, WARN for sqlx. Override
/// with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vendo=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Waits for a shutdown signal (ctrl-c or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
