use std::sync::Arc;

use api::AppState;
use api::router::router;
use chirpr_core::AppConfig;

#[tokio::main]
async fn main() {
    // .env is optional; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let pool = storage::connect(&config.database.url).await?;
    storage::run_migrations(&pool).await?;

    let state = Arc::new(AppState::new(pool, &config));
    let app = router(state, &config.server.assets_dir);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(platform = %config.platform, "listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
