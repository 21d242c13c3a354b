/**
 * Server Storage Configuration
 *
 * Connects the PostgreSQL pool and runs the embedded migrations. Without a
 * `DATABASE_URL` the server falls back to in-memory stores (see `init`).
 *
 * Unlike optional collaborators, a configured but unreachable database is
 * fatal: the server refuses to start rather than silently serving an empty
 * in-memory site.
 */

use sqlx::PgPool;

/// Connect to PostgreSQL and bring the schema up to date
///
/// # Errors
///
/// Returns the connection or migration error; the caller aborts startup.
pub async fn load_database(database_url: &str) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let pool = PgPool::connect(database_url).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;

    tracing::info!("Database connection pool created successfully");
    tracing::info!("Running database migrations...");

    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        sqlx::Error::from(e)
    })?;

    tracing::info!("Database migrations completed successfully");
    Ok(pool)
}
