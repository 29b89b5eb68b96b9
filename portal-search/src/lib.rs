//! portal-search library - cross-entity site search
//!
//! One query fans out to every content source (news, vacancies, branches,
//! management and the per-section category and page tables); the hits are
//! localized, normalized and ranked into a single list.

use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod search;
pub mod sources;

pub use error::{ApiError, ApiResult};
pub use search::SearchAggregator;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<SearchAggregator>,
    /// Server start, for uptime reporting
    pub startup_time: Instant,
}

impl AppState {
    pub fn new(aggregator: SearchAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            startup_time: Instant::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/search/all", get(api::search_all))
        .merge(api::health_routes())
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
