//! Static description of one searchable content repository
//!
//! A [`SourceDescriptor`] is everything the generic adapter and the result
//! normalizer need to know about a table: which columns are matched, which
//! columns become the title and excerpt, how the URL is built and where the
//! category label comes from.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Maximum number of raw records fetched from a single source per request
pub const PER_SOURCE_CAP: usize = 20;

/// Multilingual text column stored as a (ru, en, be) triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedField {
    /// Base (Russian) column, always populated for published records
    pub base: &'static str,
    pub en: &'static str,
    pub be: &'static str,
}

impl LocalizedField {
    pub const fn new(base: &'static str, en: &'static str, be: &'static str) -> Self {
        Self { base, en, be }
    }

    pub fn columns(&self) -> [&'static str; 3] {
        [self.base, self.en, self.be]
    }
}

/// Column participating in the substring match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// All three language columns are matched
    Localized(LocalizedField),
    /// Single non-multilingual column (phone, email, ...)
    Plain(&'static str),
}

impl SearchField {
    pub fn columns(&self) -> Vec<&'static str> {
        match self {
            SearchField::Localized(field) => field.columns().to_vec(),
            SearchField::Plain(column) => vec![*column],
        }
    }
}

/// How a result URL is derived from a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlTemplate {
    /// Same URL for every record (e.g. a section index page)
    Fixed(&'static str),
    /// `{prefix}/{id}`
    ById { prefix: &'static str },
    /// `{prefix}/{page_type}`, or just `{prefix}` when the record has no page type
    ByPageType {
        prefix: &'static str,
        column: &'static str,
    },
}

impl UrlTemplate {
    /// Column the template reads besides `id`, if any
    pub fn column(&self) -> Option<&'static str> {
        match self {
            UrlTemplate::ByPageType { column, .. } => Some(*column),
            _ => None,
        }
    }

    pub fn render(&self, record: &RawRecord) -> String {
        match self {
            UrlTemplate::Fixed(path) => path.to_string(),
            UrlTemplate::ById { prefix } => format!("{}/{}", prefix, record.id),
            UrlTemplate::ByPageType { prefix, column } => match record.text(column) {
                Some(page_type) if !page_type.trim().is_empty() => {
                    format!("{}/{}", prefix, page_type.trim())
                }
                _ => prefix.to_string(),
            },
        }
    }
}

/// Related entity joined to supply the category label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub table: &'static str,
    /// Column of the source table referencing `table.id`
    pub foreign_key: &'static str,
    /// Display name columns of the related table
    pub name: LocalizedField,
    /// Label used when the record has no related entity
    pub fallback: &'static str,
}

/// Where the `category` of a result comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    /// Constant label intrinsic to the source
    Literal(&'static str),
    /// Resolved name of a joined entity
    Relation(Relation),
}

/// One content repository participating in the search
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    /// Result `type`, also the ranking key
    pub source_type: &'static str,
    /// Backing table, unique per descriptor
    pub table: &'static str,
    pub searchable_fields: Vec<SearchField>,
    pub title: LocalizedField,
    /// `None` when the source has no description column
    pub excerpt: Option<LocalizedField>,
    pub url: UrlTemplate,
    pub category: CategorySource,
    /// Creation timestamp column; `None` means results are dated "now"
    pub date_column: Option<&'static str>,
    /// Only rows with `is_active = 1` are searchable
    pub requires_active: bool,
    pub cap: usize,
}

impl SourceDescriptor {
    /// Unique name used in logs and diagnostics
    pub fn name(&self) -> &'static str {
        self.table
    }

    /// Text columns the adapter must load, without duplicates, in declaration order
    pub fn text_columns(&self) -> Vec<&'static str> {
        let mut columns: Vec<&'static str> = Vec::new();
        let candidates = self
            .searchable_fields
            .iter()
            .flat_map(SearchField::columns)
            .chain(self.title.columns())
            .chain(self.excerpt.iter().flat_map(LocalizedField::columns))
            .chain(self.url.column());

        for column in candidates {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns
    }

    /// Columns participating in the substring match
    pub fn searchable_columns(&self) -> Vec<&'static str> {
        self.searchable_fields
            .iter()
            .flat_map(SearchField::columns)
            .collect()
    }
}

/// A record as returned by a source adapter
///
/// Only non-NULL text columns are present in `fields`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub id: i64,
    pub fields: HashMap<String, String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Joined entity declared by [`CategorySource::Relation`], when present
    pub related: Option<Box<RawRecord>>,
}

impl RawRecord {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_field(mut self, column: &str, value: impl Into<String>) -> Self {
        self.fields.insert(column.to_string(), value.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_related(mut self, related: RawRecord) -> Self {
        self.related = Some(Box::new(related));
        self
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}
