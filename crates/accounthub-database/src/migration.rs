//! Embedded schema migrations and the startup schema check for the user
//! store.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::{info, warn};

use accounthub_core::error::{AppError, ErrorKind};

/// Migrations under `/migrations`, compiled into the binary.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Table backing [`crate::PgUserRepository`].
pub const USERS_TABLE: &str = "users";

/// Bring the schema up to date (when `apply` is set) and confirm the users
/// table is reachable.
///
/// With `apply` off the schema is assumed to be managed externally, so a
/// missing table is a configuration error rather than a database one.
pub async fn prepare_schema(pool: &PgPool, apply: bool) -> Result<(), AppError> {
    if apply {
        info!(migrations = MIGRATOR.iter().count(), "Applying user store migrations");
        MIGRATOR.run(pool).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;
    } else {
        warn!("database.run_migrations is off; expecting an existing schema");
    }

    if !users_table_exists(pool).await? {
        return Err(AppError::configuration(format!(
            "Table '{USERS_TABLE}' not found; enable database.run_migrations or migrate manually"
        )));
    }

    info!(table = USERS_TABLE, "User store schema ready");
    Ok(())
}

async fn users_table_exists(pool: &PgPool) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, bool>("SELECT to_regclass($1) IS NOT NULL")
        .bind(format!("public.{USERS_TABLE}"))
        .fetch_one(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to inspect schema: {e}"),
                e,
            )
        })
}
