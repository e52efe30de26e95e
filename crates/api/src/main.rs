use std::net::SocketAddr;
use std::sync::Arc;

use mondaysync_api::config::{LogFormat, SyncConfig};
use mondaysync_api::router::build_app_router;
use mondaysync_api::state::AppState;
use mondaysync_api::telemetry;
use mondaysync_monday::MondayApi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            telemetry::init(LogFormat::default());
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    // --- Tracing ---
    telemetry::init(config.log_format);
    tracing::info!(
        host = %config.host,
        port = config.port,
        board_id = config.board_id,
        table = %config.target_table,
        triggers = ?config.trigger_column_ids,
        mapped_columns = config.column_mapping.len(),
        signature_check = config.signing_secret.is_some(),
        "Loaded sync configuration",
    );

    // --- Database ---
    let pool = mondaysync_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    mondaysync_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    if config.run_migrations {
        mondaysync_db::run_migrations(&pool)
            .await
            .expect("Failed to run database migrations");
        tracing::info!("Database migrations applied");
    }

    // --- monday.com client ---
    let monday = MondayApi::new(&config.monday_api_token, config.monday_api_url.clone())
        .expect("Failed to build monday.com client");

    // --- App state ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config),
        monday,
    };

    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, closing database pool");
    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
