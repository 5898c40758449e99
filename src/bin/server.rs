use anyhow::Context;
use trivia_api::{
    db::{establish_connection, run_migrations},
    server::app::run_server,
    settings::Settings,
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    init_tracing(&settings.log);
    let pool = establish_connection(&settings.database.path)
        .await
        .with_context(|| format!("Cannot open database {}", settings.database.path))?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool).await?;

    run_server(pool, &settings.server.address()).await
}
