use app_state::AppSettings;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Get a database connection pool for the analysis cache.
///
/// # Errors
///
/// * `PgPool::connect` can return an error if the database connection fails.
pub async fn get_db_pool(settings: &AppSettings) -> color_eyre::Result<Pool<Postgres>> {
    let db_settings = &settings.cache.database;
    info!("Connecting to database.");
    let pool = PgPoolOptions::new()
        .max_connections(db_settings.max_connections)
        .min_connections(db_settings.min_connections)
        .max_lifetime(db_settings.max_lifetime)
        .idle_timeout(db_settings.idle_timeout)
        .acquire_timeout(db_settings.acquire_timeout)
        .test_before_acquire(true)
        .connect(&settings.secrets.database_url)
        .await?;
    Ok(pool)
}

/// Apply pending migrations from the workspace `migrations` folder.
pub async fn run_migrations(pool: &Pool<Postgres>) -> color_eyre::Result<()> {
    info!("Running database migrations.");
    sqlx::migrate!("../../../migrations").run(pool).await?;
    Ok(())
}
