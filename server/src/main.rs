//! University portal API server
//!
//! Serves the student authentication, course and enrollment API over a
//! SQLite database, seeding demo data on first run.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use uniportal_server::config::AppConfig;
use uniportal_server::db::{seed_demo_data, Database};
use uniportal_server::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let db = Database::connect(&config.database_url, config.database_max_connections)
        .await
        .with_context(|| format!("failed to open database at {}", config.database_url))?;
    info!(url = %config.database_url, "database initialized");

    if config.seed_demo_data {
        seed_demo_data(db.pool(), config.bcrypt_cost)
            .await
            .context("failed to seed demo data")?;
    }

    let state = AppState::from_config(&db, &config);
    let app = build_router(state, &config.cors_allowed_origins);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("API available at http://{}/api", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.pool().close().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    info!("Shutting down server...");
}
