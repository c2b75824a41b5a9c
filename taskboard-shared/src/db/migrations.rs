/// Database migration runner
///
/// Migrations live in the `migrations/` directory at the workspace root,
/// one plain SQL file per schema change, applied in timestamp order by
/// sqlx's migrator. The API server runs them at startup; the integration
/// tests run them before touching the database.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file is malformed or fails to execute.
/// A failed migration is rolled back and nothing after it is applied.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("../migrations");

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
