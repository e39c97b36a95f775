//! Connection pool construction and database bootstrap.

use crate::config::DatabaseSettings;
use crate::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::ConnectOptions;

/// Build the shared pool. Connections are acquired per statement and returned on every exit path.
pub async fn connect_pool(settings: &DatabaseSettings) -> Result<PgPool, AppError> {
    let options = settings.connect_options()?;
    tracing::info!(target_db = %settings.display_target(), max_connections = settings.max_connections, "connecting");
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Ensure the configured database exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before [`connect_pool`].
pub async fn ensure_database_exists(settings: &DatabaseSettings) -> Result<(), AppError> {
    let options = settings.connect_options()?;
    let db_name = options.get_database().unwrap_or_default().to_string();
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let mut conn = options.database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_quoted_with_doubled_quotes() {
        assert_eq!(quote_ident("student_db"), "\"student_db\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }
}
