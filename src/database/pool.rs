use std::time::Duration;

use sqlx::{PgPool, migrate::Migrator, postgres::PgPoolOptions};

use crate::config::Config;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const MAX_CONNECTIONS: u32 = 25;
const MIN_CONNECTIONS: u32 = 5;

/// Connects to Postgres and brings the schema up to date before the
/// server accepts traffic.
pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .min_connections(MIN_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect(&config.database_url)
        .await?;

    MIGRATOR.run(&pool).await?;

    tracing::info!(
        max_connections = MAX_CONNECTIONS,
        migrations = MIGRATOR.iter().count(),
        "Database ready"
    );

    Ok(pool)
}
