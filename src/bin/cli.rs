use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use trivia_api::db::queries::categories::{get_all_categories, import_categories};
use trivia_api::db::queries::questions::{get_all_questions, import_questions};
use trivia_api::db::{establish_connection, run_migrations, Category, Question};
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database path
    db_path: PathBuf,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the schema
    Migrate,
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories.csv and questions.csv into a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // the database comes from the command line; only logging is configurable
    let log = Settings::load().map(|s| s.log).unwrap_or_default();
    init_tracing(&log);
    let pool = establish_connection(&cli.db_path.display().to_string())
        .await
        .context("Cannot connect to DB")?;
    run_migrations(&pool).await.context("Migrations failed")?;
    match cli.command {
        Commands::Migrate => tracing::info!("Schema is up to date"),
        Commands::Export { path } => export_data(&pool, &path).await.context("Cannot export")?,
        Commands::Import { path } => import_data(&pool, &path).await.context("Cannot import")?,
    }
    Ok(())
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    rows.iter().try_for_each(|row| writer.serialize(row))?;
    writer.flush()?;
    Ok(())
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .with_context(|| format!("Malformed row in {}", path.display()))?;
    Ok(rows)
}

async fn export_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !path.exists() {
        std::fs::create_dir_all(path)?
    }
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Exporting to {}",
        path.display()
    );
    write_csv(&path.join("categories.csv"), &categories)?;
    write_csv(&path.join("questions.csv"), &questions)?;
    Ok(())
}

async fn import_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_csv(&path.join("categories.csv"))?;
    let questions: Vec<Question> = read_csv(&path.join("questions.csv"))?;
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Importing from {}",
        path.display()
    );
    import_categories(pool, categories).await?;
    import_questions(pool, questions).await?;
    Ok(())
}
