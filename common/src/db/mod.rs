//! Database pool and migration helpers

use sqlx::{postgres::PgPoolOptions, PgPool, Pool, Postgres};

use crate::error::Result;

/// Database pool type
pub type DbPool = Pool<Postgres>;

/// Connect to PostgreSQL with the given pool size
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Run migrations on the database
///
/// The migrations directory lives at the workspace root, next to the member
/// crates, so it is resolved relative to this crate's manifest.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrations_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("common crate must live inside the workspace")
        .join("migrations");

    sqlx::migrate::Migrator::new(migrations_path)
        .await?
        .run(pool)
        .await?;

    Ok(())
}
