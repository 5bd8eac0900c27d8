use anyhow::Context;
use bookflow::logging::init_logging;
use bookflow::router::init_router;
use bookflow::state::AppState;
use bookflow_config::AppConfig;
use bookflow_db::{init_db_pool, run_migrations};
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    let db = init_db_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    let app = init_router(AppState::new(db, &config));

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(%address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
