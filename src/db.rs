use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Opens a PostgreSQL connection pool against the given connection string
pub async fn connect_sqlx(db_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(16).connect(db_url).await
}
