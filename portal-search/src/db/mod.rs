//! Database access for portal-search
//!
//! The search service never writes: content is maintained by the site's
//! editors through other services.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

/// Lookups per request, one connection each
const MAX_CONNECTIONS: u32 = 16;

/// Connect to the content database in read-only mode
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        anyhow::bail!(
            "Database not found: {}\nThe content database must be initialized before the search service starts.",
            db_path.display()
        );
    }

    let db_url = format!("sqlite://{}?mode=ro", db_path.display());
    let options = SqliteConnectOptions::from_str(&db_url)
        .with_context(|| format!("Invalid database path: {}", db_path.display()))?;

    SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .context("Failed to connect to database in read-only mode")
}
