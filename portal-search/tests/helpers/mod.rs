//! Shared fixtures for portal-search integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

use portal_search::sources::{default_catalog, sqlite_sources};
use portal_search::{build_router, AppState, SearchAggregator};

/// Temporary content database with a writable pool for seeding
pub struct TestSite {
    _dir: TempDir,
    pub db_path: PathBuf,
    pub writer: SqlitePool,
}

impl TestSite {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("Should create temp dir");
        let db_path = dir.path().join("portal.db");
        let writer = portal_common::db::init_database(&db_path)
            .await
            .expect("Should initialize content database");
        Self {
            _dir: dir,
            db_path,
            writer,
        }
    }

    /// Run one seeding statement
    pub async fn exec(&self, sql: &str) {
        sqlx::query(sql)
            .execute(&self.writer)
            .await
            .unwrap_or_else(|e| panic!("Seed failed: {}\n{}", e, sql));
    }

    pub async fn insert_news(&self, title: &str, created_at: &str) {
        sqlx::query("INSERT INTO news (title, created_at) VALUES (?, ?)")
            .bind(title)
            .bind(created_at)
            .execute(&self.writer)
            .await
            .expect("Should insert news");
    }

    pub async fn insert_vacancy(&self, title: &str, created_at: &str) {
        sqlx::query("INSERT INTO vacancies (title, created_at) VALUES (?, ?)")
            .bind(title)
            .bind(created_at)
            .execute(&self.writer)
            .await
            .expect("Should insert vacancy");
    }

    /// Router over a fresh read-only connection, as the binary builds it
    pub async fn app(&self) -> Router {
        let pool = portal_search::db::connect_readonly(&self.db_path)
            .await
            .expect("Should connect read-only");
        let aggregator = SearchAggregator::new(
            sqlite_sources(&pool, default_catalog()),
            Duration::from_secs(5),
        );
        build_router(AppState::new(aggregator))
    }
}

/// `/search/all` URI with percent-encoded parameters
pub fn search_uri(query: &str, language: Option<&str>) -> String {
    let mut uri = format!("/search/all?query={}", urlencoding::encode(query));
    if let Some(language) = language {
        uri.push_str("&language=");
        uri.push_str(&urlencoding::encode(language));
    }
    uri
}

/// GET `uri` and return status plus parsed JSON body
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let json = serde_json::from_slice(&bytes).expect("Should parse JSON");
    (status, json)
}

/// `(type, title)` pairs of a search response, in order
pub fn types_and_titles(body: &Value) -> Vec<(String, String)> {
    body["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|r| {
            (
                r["type"].as_str().unwrap_or_default().to_string(),
                r["title"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}
