use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

pub mod markets;
pub mod price_history;

/// Initialize the Postgres connection pool.
///
/// The `markets` and `price_history` tables are owned by the history service;
/// nothing here creates or migrates them.
pub async fn init_db(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await
}
