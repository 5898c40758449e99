pub mod queries;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

use sqlx::Error;

pub async fn establish_connection(path: &str) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(format!("sqlite:{}", path).as_str())?
        .create_if_missing(true);
    SqlitePool::connect_with(options).await
}

/// Single-connection pool over a private in-memory database.
///
/// Every SQLite `:memory:` connection is its own database, so the pool is
/// capped at one connection that is never recycled.
pub async fn establish_in_memory() -> Result<SqlitePool, Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = establish_in_memory().await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}
