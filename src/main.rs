use std::net::SocketAddr;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use greenhouse_api::common::AppState;
use greenhouse_api::config::Config;
use greenhouse_api::routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    // Initialize tracing
    let default_filter = if config.environment.is_development() {
        "debug,greenhouse_api=debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting greenhouse-api...");
    tracing::info!(
        environment = ?config.environment,
        port = config.port,
        dummy_data = config.use_dummy_data,
        "Configuration loaded"
    );

    let db = connect_database(&config).await;
    let state = AppState::new(db, config.clone());

    // Build router
    let app = routes::build_router(state);

    // Start server with graceful shutdown
    let addr = config.bind_address();
    tracing::info!(address = %addr, "Starting server");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Lazy pool so a missing or unreachable database surfaces on first use
/// inside a handler, not at startup. Dummy mode never opens a connection.
async fn connect_database(config: &Config) -> Option<DatabaseConnection> {
    if config.use_dummy_data {
        tracing::warn!("USE_DUMMY_DATA enabled; serving canned data without a database");
        return None;
    }

    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL is not set; data routes will fail until it is configured");
        return None;
    };

    let mut options = ConnectOptions::new(url);
    options
        .min_connections(config.db_pool_size)
        .max_connections(config.db_max_connections())
        .connect_lazy(true)
        .sqlx_logging(config.environment.is_development());

    match Database::connect(options).await {
        Ok(db) => {
            tracing::info!(
                pool_size = config.db_pool_size,
                max_overflow = config.db_max_overflow,
                "Database pool initialized"
            );
            Some(db)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize database pool; data routes will fail");
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
