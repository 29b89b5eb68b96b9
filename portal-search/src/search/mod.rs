//! Search pipeline
//!
//! intake → fan-out over sources → language resolution and normalization
//! → ranking. The HTTP layer only wraps [`SearchAggregator::aggregate`].

pub mod aggregator;
pub mod language;
pub mod normalize;
pub mod query;
pub mod rank;

pub use aggregator::SearchAggregator;
pub use query::{intake, too_short_message, QueryIntake, SearchQuery};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Uniform shape of every search hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnifiedResult {
    /// Source-local identifier, not unique across types
    pub id: i64,
    #[serde(rename = "type")]
    pub result_type: String,
    pub title: String,
    /// Possibly empty, never absent
    pub excerpt: String,
    pub url: String,
    pub date: DateTime<Utc>,
    pub category: String,
}

/// Ranked results of one aggregation
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub results: Vec<UnifiedResult>,
    /// Sources that failed or timed out, in dispatch order (logged only)
    pub failed_sources: Vec<&'static str>,
}

/// Aggregate-level failure, reported to the client as HTTP 500
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Source task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
