use anyhow::Context;
use trivia_api::{
    db::{establish_connection, run_migrations},
    server::run_server,
    settings::Settings,
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing()?;
    let settings = Settings::load().context("Failed to load configuration")?;

    let pool = establish_connection(&settings.database)
        .await
        .with_context(|| format!("Cannot open {}", settings.database.path.display()))?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool).await?;

    run_server(pool, &settings.application).await
}
