//! Database migrations

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;

// Migrations live at the workspace root so integration tests across crates
// can share the exact same schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("database migrations failed")?;
    info!("database migrations applied");
    Ok(())
}
