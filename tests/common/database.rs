//! PostgreSQL test fixtures
//!
//! Database tests run only when `TEST_DATABASE_URL` points at a scratch
//! database. Every fixture call migrates it and empties both tables, so the
//! tests using it are marked `#[serial]`.

use foundation_cms::backend::server::config::load_database;
use sqlx::PgPool;

/// Connect, migrate and truncate the test database, or `None` when unset
pub async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping database test");
        return None;
    };

    let pool = load_database(&url)
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&pool)
        .await
        .expect("Failed to clean test database");
    Some(pool)
}

/// Remove all rows while preserving the schema
pub async fn cleanup_test_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE TABLE users, documents")
        .execute(pool)
        .await?;
    Ok(())
}
