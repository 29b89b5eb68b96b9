//! Source adapters
//!
//! Each adapter performs a substring lookup against one content repository
//! and returns at most its descriptor's `cap` raw records. Adapters are
//! independent: the aggregator isolates their failures from one another.

pub mod catalog;
pub mod descriptor;
pub mod sqlite;

pub use catalog::default_catalog;
pub use descriptor::{
    CategorySource, LocalizedField, RawRecord, Relation, SearchField, SourceDescriptor,
    UrlTemplate, PER_SOURCE_CAP,
};
pub use sqlite::SqliteSource;

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single source lookup
///
/// Never surfaces to the client; the aggregator logs it and moves on.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("Lookup panicked: {0}")]
    Panicked(String),
}

/// Substring lookup against one content repository
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn descriptor(&self) -> &SourceDescriptor;

    /// Records whose searchable fields contain `term`, case-insensitively
    async fn search(&self, term: &str) -> Result<Vec<RawRecord>, SourceError>;
}

/// Build one SQLite adapter per catalog entry, preserving catalog order
pub fn sqlite_sources(
    pool: &SqlitePool,
    catalog: Vec<SourceDescriptor>,
) -> Vec<Arc<dyn SourceAdapter>> {
    catalog
        .into_iter()
        .map(|descriptor| {
            Arc::new(SqliteSource::new(pool.clone(), descriptor)) as Arc<dyn SourceAdapter>
        })
        .collect()
}

#[cfg(test)]
pub mod mock {
    //! Mock source for aggregator and handler tests

    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Records(Vec<RawRecord>),
        Delayed(Duration, Vec<RawRecord>),
        Fail,
        Panic,
        Hang,
    }

    pub struct MockSource {
        descriptor: SourceDescriptor,
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn with_behavior(descriptor: SourceDescriptor, behavior: Behavior) -> Self {
            Self {
                descriptor,
                behavior,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn new(descriptor: SourceDescriptor, records: Vec<RawRecord>) -> Self {
            Self::with_behavior(descriptor, Behavior::Records(records))
        }

        /// Answers with `records` after sleeping for `delay`
        pub fn delayed(
            descriptor: SourceDescriptor,
            delay: Duration,
            records: Vec<RawRecord>,
        ) -> Self {
            Self::with_behavior(descriptor, Behavior::Delayed(delay, records))
        }

        pub fn failing(descriptor: SourceDescriptor) -> Self {
            Self::with_behavior(descriptor, Behavior::Fail)
        }

        pub fn panicking(descriptor: SourceDescriptor) -> Self {
            Self::with_behavior(descriptor, Behavior::Panic)
        }

        pub fn hanging(descriptor: SourceDescriptor) -> Self {
            Self::with_behavior(descriptor, Behavior::Hang)
        }

        /// Number of `search` calls received so far
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SourceAdapter for MockSource {
        fn descriptor(&self) -> &SourceDescriptor {
            &self.descriptor
        }

        async fn search(&self, _term: &str) -> Result<Vec<RawRecord>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Records(records) => Ok(records.clone()),
                Behavior::Delayed(delay, records) => {
                    tokio::time::sleep(*delay).await;
                    Ok(records.clone())
                }
                Behavior::Fail => Err(SourceError::Database(sqlx::Error::RowNotFound)),
                Behavior::Panic => panic!("mock source {} exploded", self.descriptor.table),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(Vec::new())
                }
            }
        }
    }
}
