//! Generic SQLite-backed source adapter
//!
//! One implementation serves every [`SourceDescriptor`]. The SELECT is built
//! once from the descriptor; rows are streamed newest-first and matched in
//! Rust, because SQLite's `LIKE` and `lower()` only fold ASCII and most of the
//! site's content is Cyrillic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::descriptor::{CategorySource, RawRecord, SourceDescriptor};
use super::{SourceAdapter, SourceError};

/// Alias prefix for columns of the joined relation
const RELATED_PREFIX: &str = "related.";

/// Source adapter reading one content table
pub struct SqliteSource {
    pool: SqlitePool,
    descriptor: SourceDescriptor,
    sql: String,
    text_columns: Vec<&'static str>,
    searchable_columns: Vec<&'static str>,
}

impl SqliteSource {
    pub fn new(pool: SqlitePool, descriptor: SourceDescriptor) -> Self {
        let sql = build_select(&descriptor);
        let text_columns = descriptor.text_columns();
        let searchable_columns = descriptor.searchable_columns();
        Self {
            pool,
            descriptor,
            sql,
            text_columns,
            searchable_columns,
        }
    }

    fn decode_row(&self, row: &SqliteRow) -> Result<RawRecord, sqlx::Error> {
        let mut record = RawRecord::new(row.try_get::<i64, _>("id")?);

        for column in &self.text_columns {
            if let Some(value) = row.try_get::<Option<String>, _>(*column)? {
                record.fields.insert(column.to_string(), value);
            }
        }

        if let Some(date_column) = self.descriptor.date_column {
            record.created_at = row.try_get::<Option<DateTime<Utc>>, _>(date_column)?;
        }

        if let CategorySource::Relation(relation) = &self.descriptor.category {
            let related_id_alias = format!("{RELATED_PREFIX}id");
            if let Some(related_id) = row.try_get::<Option<i64>, _>(related_id_alias.as_str())? {
                let mut related = RawRecord::new(related_id);
                for column in relation.name.columns() {
                    let alias = format!("{RELATED_PREFIX}{column}");
                    if let Some(value) = row.try_get::<Option<String>, _>(alias.as_str())? {
                        related.fields.insert(column.to_string(), value);
                    }
                }
                record.related = Some(Box::new(related));
            }
        }

        Ok(record)
    }
}

#[async_trait]
impl SourceAdapter for SqliteSource {
    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    async fn search(&self, term: &str) -> Result<Vec<RawRecord>, SourceError> {
        let needle = term.to_lowercase();
        let mut rows = sqlx::query(&self.sql).fetch(&self.pool);
        let mut records = Vec::new();
        let mut scanned = 0usize;

        while records.len() < self.descriptor.cap {
            let Some(row) = rows.try_next().await? else {
                break;
            };
            scanned += 1;

            let record = self.decode_row(&row)?;
            if matches_term(&record, &self.searchable_columns, &needle) {
                records.push(record);
            }
        }

        debug!(
            table = self.descriptor.table,
            scanned,
            matched = records.len(),
            "Source lookup finished"
        );

        Ok(records)
    }
}

/// Build the SELECT statement for a descriptor
///
/// Identifiers come from the static catalog, never from user input.
pub fn build_select(descriptor: &SourceDescriptor) -> String {
    let mut columns = vec!["t.id AS id".to_string()];
    columns.extend(
        descriptor
            .text_columns()
            .into_iter()
            .map(|column| format!("t.{column} AS {column}")),
    );
    if let Some(date_column) = descriptor.date_column {
        columns.push(format!("t.{date_column} AS {date_column}"));
    }

    let mut join = String::new();
    if let CategorySource::Relation(relation) = &descriptor.category {
        columns.push(format!("r.id AS \"{RELATED_PREFIX}id\""));
        columns.extend(
            relation
                .name
                .columns()
                .into_iter()
                .map(|column| format!("r.{column} AS \"{RELATED_PREFIX}{column}\"")),
        );
        join = format!(
            " LEFT JOIN {} r ON r.id = t.{}",
            relation.table, relation.foreign_key
        );
    }

    let filter = if descriptor.requires_active {
        " WHERE t.is_active = 1"
    } else {
        ""
    };

    let order = match descriptor.date_column {
        Some(date_column) => format!(" ORDER BY t.{date_column} DESC, t.id DESC"),
        None => " ORDER BY t.id ASC".to_string(),
    };

    format!(
        "SELECT {} FROM {} t{}{}{}",
        columns.join(", "),
        descriptor.table,
        join,
        filter,
        order
    )
}

/// True when any searchable column contains `needle` (already lowercased)
fn matches_term(record: &RawRecord, columns: &[&str], needle: &str) -> bool {
    columns.iter().any(|column| {
        record
            .text(column)
            .map_or(false, |value| value.to_lowercase().contains(needle))
    })
}
