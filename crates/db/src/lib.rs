//! PostgreSQL access for the sync bridge: pool setup, migrations, and the
//! append-only row inserter.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod ident;
pub mod repositories;

pub use ident::{quote_ident, TargetTable};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
///
/// Connections are pinged before being handed out so a restarted database
/// does not surface stale-connection errors on the next webhook.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .test_before_acquire(true)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the bundled migrations (creates the default `monday_logger` table).
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
