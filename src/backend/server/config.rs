/**
 * Server Configuration
 *
 * This module turns the loaded `AppConfig` into the services the server runs
 * on, starting with the credential directory.
 *
 * # Error Handling
 *
 * A database that cannot be reached does not prevent startup: the failure is
 * logged and the server falls back to the in-memory directory.
 */

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use crate::backend::auth::{MemoryDirectory, PgDirectory, SharedDirectory};
use crate::shared::AppConfig;

/// Largest number of pooled database connections
const MAX_DB_CONNECTIONS: u32 = 10;

/// Pick and initialize the credential directory
///
/// 1. No `database_url` → in-memory directory
/// 2. Connect a PostgreSQL pool and run the embedded migrations
/// 3. On a connection failure, fall back to the in-memory directory
///
/// A failed migration is logged but the pool is still used, since the
/// schema may already be current.
pub async fn load_directory(config: &AppConfig) -> SharedDirectory {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using in-memory credential directory.");
        return Arc::new(MemoryDirectory::new());
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to in-memory credential directory.");
            return Arc::new(MemoryDirectory::new());
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing with existing schema");
        }
    }

    Arc::new(PgDirectory::new(pool))
}
