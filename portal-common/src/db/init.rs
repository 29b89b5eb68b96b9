//! Content database initialization
//!
//! Creates the content tables maintained by the site's editors. Text columns
//! that are published in several languages are stored as triples:
//! `field` (ru, required), `field_en` and `field_be` (optional).

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Site sections that each own a category table and a page content table
/// (`<section>_categories`, `<section>_page_content`).
pub const SITE_SECTIONS: [&str; 5] = ["about", "services", "aeronautical", "social", "appeals"];

/// Open (creating if needed) the content database and ensure all tables exist
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    create_content_schema(&pool).await?;

    Ok(pool)
}

/// Create every content table (idempotent - safe to call multiple times)
pub async fn create_content_schema(pool: &SqlitePool) -> Result<()> {
    create_news_categories_table(pool).await?;
    create_news_table(pool).await?;
    create_vacancies_table(pool).await?;
    create_branches_table(pool).await?;
    create_management_table(pool).await?;

    for section in SITE_SECTIONS {
        create_section_categories_table(pool, section).await?;
        create_section_page_content_table(pool, section).await?;
    }

    Ok(())
}

async fn create_news_categories_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS news_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            name_en TEXT,
            name_be TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_news_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS news (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            title_en TEXT,
            title_be TEXT,
            excerpt TEXT,
            excerpt_en TEXT,
            excerpt_be TEXT,
            content TEXT,
            content_en TEXT,
            content_be TEXT,
            category_id INTEGER REFERENCES news_categories(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_vacancies_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vacancies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            title_en TEXT,
            title_be TEXT,
            description TEXT,
            description_en TEXT,
            description_be TEXT,
            requirements TEXT,
            requirements_en TEXT,
            requirements_be TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_branches_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS branches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            name_en TEXT,
            name_be TEXT,
            address TEXT,
            address_en TEXT,
            address_be TEXT,
            phone TEXT,
            email TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_management_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS management (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            full_name_en TEXT,
            full_name_be TEXT,
            position TEXT,
            position_en TEXT,
            position_be TEXT,
            biography TEXT,
            biography_en TEXT,
            biography_be TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Category tables carry no timestamp; hidden categories have `is_active = 0`.
async fn create_section_categories_table(pool: &SqlitePool, section: &str) -> Result<()> {
    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {section}_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            name_en TEXT,
            name_be TEXT,
            description TEXT,
            description_en TEXT,
            description_be TEXT,
            page_type TEXT,
            parent_id INTEGER REFERENCES {section}_categories(id) ON DELETE CASCADE,
            sort_order INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1
        )
        "#
    );
    sqlx::query(&sql).execute(pool).await?;
    Ok(())
}

async fn create_section_page_content_table(pool: &SqlitePool, section: &str) -> Result<()> {
    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {section}_page_content (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            page_type TEXT,
            title TEXT NOT NULL,
            title_en TEXT,
            title_be TEXT,
            content TEXT,
            content_en TEXT,
            content_be TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#
    );
    sqlx::query(&sql).execute(pool).await?;
    Ok(())
}
