//! Concurrent fan-out over every source adapter
//!
//! Each lookup runs as its own task under a timeout and a panic guard, so a
//! slow, failing or crashing source only removes its own contribution.
//! Results are gathered per dispatch slot, which keeps the merged list in
//! catalog order before ranking regardless of completion order.

use chrono::Utc;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::normalize::normalize;
use super::query::SearchQuery;
use super::rank::rank;
use super::{ResultSet, SearchError};
use crate::sources::{RawRecord, SourceAdapter, SourceError};

/// Runs one query against every configured source
pub struct SearchAggregator {
    sources: Vec<Arc<dyn SourceAdapter>>,
    source_timeout: Duration,
}

impl SearchAggregator {
    /// `sources` order is the dispatch order, used as the final tie-breaker
    pub fn new(sources: Vec<Arc<dyn SourceAdapter>>, source_timeout: Duration) -> Self {
        Self {
            sources,
            source_timeout,
        }
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Query all sources concurrently and return the ranked, merged results
    ///
    /// Source failures never fail the call; they are logged and reported in
    /// [`ResultSet::failed_sources`]. Dropping the returned future aborts any
    /// lookups still in flight.
    pub async fn aggregate(&self, query: &SearchQuery) -> Result<ResultSet, SearchError> {
        let started = Instant::now();
        let now = Utc::now();

        debug!(term = %query.term, sources = self.sources.len(), "Dispatching source lookups");
        let mut tasks = JoinSet::new();
        for (index, source) in self.sources.iter().enumerate() {
            let source = Arc::clone(source);
            let term = query.term.clone();
            let limit = self.source_timeout;
            tasks.spawn(async move { (index, lookup(source.as_ref(), &term, limit).await) });
        }

        let mut slots: Vec<Option<Vec<RawRecord>>> = self.sources.iter().map(|_| None).collect();
        let mut failed: Vec<usize> = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            let (index, outcome) = joined?;
            let descriptor = self.sources[index].descriptor();
            match outcome {
                Ok(records) => {
                    debug!(
                        table = descriptor.table,
                        matched = records.len(),
                        "Source lookup succeeded"
                    );
                    slots[index] = Some(records);
                }
                Err(e) => {
                    warn!(
                        source_type = descriptor.source_type,
                        table = descriptor.table,
                        error = %e,
                        "Source lookup failed (isolated, contributes no results)"
                    );
                    failed.push(index);
                }
            }
        }

        let mut results = Vec::new();
        for (source, records) in self.sources.iter().zip(slots) {
            let descriptor = source.descriptor();
            results.extend(
                records
                    .into_iter()
                    .flatten()
                    .map(|record| normalize(&record, descriptor, query.language, now)),
            );
        }
        rank(&mut results);

        failed.sort_unstable();
        let failed_sources: Vec<&'static str> = failed
            .into_iter()
            .map(|index| self.sources[index].descriptor().name())
            .collect();

        info!(
            term = %query.term,
            language = %query.language,
            results = results.len(),
            sources = self.sources.len(),
            failed = failed_sources.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Search completed"
        );

        Ok(ResultSet {
            results,
            failed_sources,
        })
    }
}

/// One guarded source lookup
async fn lookup(
    source: &dyn SourceAdapter,
    term: &str,
    limit: Duration,
) -> Result<Vec<RawRecord>, SourceError> {
    let guarded = AssertUnwindSafe(source.search(term)).catch_unwind();
    match tokio::time::timeout(limit, guarded).await {
        Err(_) => Err(SourceError::Timeout(limit)),
        Ok(Err(panic)) => Err(SourceError::Panicked(panic_message(panic.as_ref()))),
        Ok(Ok(outcome)) => outcome,
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
