//! Schema setup and teardown for the `item` table.
//!
//! The SQL scripts under `migrations/` and `cleanup/` are compiled into the
//! crate, so the binary does not depend on the source tree at runtime.

use sqlx::PgPool;

/// Applied in order by [`init_database`]. Every script is idempotent.
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_create_item",
    include_str!("../../migrations/001_create_item.sql"),
)];

/// Applied in reverse order by [`cleanup_database`].
const CLEANUP: &[(&str, &str)] = &[(
    "001_drop_item",
    include_str!("../../cleanup/001_drop_item.sql"),
)];

/// Creates the schema; safe to call on every start.
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use item_catalog_postgres::init_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), sqlx::Error> {
/// init_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    run_scripts(pool, MIGRATIONS.iter()).await
}

/// Drops everything [`init_database`] created.
pub async fn cleanup_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    run_scripts(pool, CLEANUP.iter().rev()).await
}

async fn run_scripts<'a>(
    pool: &PgPool,
    scripts: impl Iterator<Item = &'a (&'static str, &'static str)>,
) -> Result<(), sqlx::Error> {
    for (name, sql) in scripts {
        tracing::debug!(script = name, "executing sql script");
        sqlx::raw_sql(sql).execute(pool).await?;
    }
    Ok(())
}
