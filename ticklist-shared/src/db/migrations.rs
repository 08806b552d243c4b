/// Database migration runner
///
/// Migrations live in `migrations/` at the crate root and are embedded at
/// compile time with `sqlx::migrate!`. The schema is two tables, `users`
/// and `tasks`, each keyed by a store-generated UUID.
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::db::migrations::{ensure_database_exists, run_migrations};
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DatabaseConfig::default();
/// ensure_database_exists(&config.url).await?;
/// let pool = create_pool(config).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```
use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{info, warn};

/// Runs all pending migrations
///
/// Safe to call on every startup; already-applied migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

/// Creates the database named in `url` if it does not exist yet
///
/// Convenience for development and tests; production databases are
/// provisioned out of band.
pub async fn ensure_database_exists(url: &str) -> Result<(), sqlx::Error> {
    if !Postgres::database_exists(url).await? {
        info!("Database does not exist, creating it");
        Postgres::create_database(url).await?;
    }

    Ok(())
}
