use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use staffhub_api::auth::provider::StaticAuthProvider;
use staffhub_api::config::{LogFormat, ServerConfig};
use staffhub_api::router::build_app_router;
use staffhub_api::state::AppState;
use staffhub_db::repositories::{EmployeeRepo, ProjectRepo};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Employee store (PostgreSQL) ---
    let pool = staffhub_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    staffhub_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    staffhub_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Project store (MongoDB) ---
    let documents = staffhub_db::connect_documents(&config.mongodb_uri, &config.mongodb_database)
        .await
        .context("Failed to connect to document store")?;
    let project_repo = ProjectRepo::new(documents);
    project_repo
        .ensure_indexes()
        .await
        .context("Failed to create project indexes")?;
    tracing::info!(database = %config.mongodb_database, "Document store ready");

    // --- Auth ---
    let auth = StaticAuthProvider::new(&config.admin, &config.user)
        .context("Failed to prepare demo credentials")?;

    // --- App state ---
    let addr = SocketAddr::new(
        config
            .host
            .parse::<IpAddr>()
            .context("Invalid HOST address")?,
        config.port,
    );
    let app_config = config.clone();
    let state = AppState::new(
        Arc::new(EmployeeRepo::new(pool)),
        Arc::new(project_repo),
        Arc::new(auth),
        config,
    );

    // --- Router ---
    let app = build_app_router(state, &app_config);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "staffhub_api=debug,staffhub_service=debug,staffhub_db=info,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
