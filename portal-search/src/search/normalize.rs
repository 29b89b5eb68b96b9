//! Raw record to [`UnifiedResult`] projection

use chrono::{DateTime, Utc};
use portal_common::Language;

use super::language::resolve;
use super::UnifiedResult;
use crate::sources::{CategorySource, RawRecord, SourceDescriptor};

/// Excerpts longer than this many characters are cut
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Appended to a cut excerpt
pub const ELLIPSIS: &str = "...";

/// Cut `text` to [`EXCERPT_MAX_CHARS`] characters plus [`ELLIPSIS`]
///
/// Counts characters, never splitting a multi-byte code point.
pub fn truncate_excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Project a raw record onto the unified result shape
///
/// `now` dates records from sources without a creation timestamp, so every
/// undated result of one aggregation carries the same instant.
pub fn normalize(
    record: &RawRecord,
    descriptor: &SourceDescriptor,
    language: Language,
    now: DateTime<Utc>,
) -> UnifiedResult {
    let excerpt = descriptor
        .excerpt
        .as_ref()
        .map(|field| truncate_excerpt(&resolve(record, field, language)))
        .unwrap_or_default();

    UnifiedResult {
        id: record.id,
        result_type: descriptor.source_type.to_string(),
        title: resolve(record, &descriptor.title, language),
        excerpt,
        url: descriptor.url.render(record),
        date: record.created_at.unwrap_or(now),
        category: category(record, &descriptor.category, language),
    }
}

fn category(record: &RawRecord, source: &CategorySource, language: Language) -> String {
    match source {
        CategorySource::Literal(label) => label.to_string(),
        CategorySource::Relation(relation) => {
            let name = record
                .related
                .as_deref()
                .map(|related| resolve(related, &relation.name, language))
                .unwrap_or_default();
            if name.trim().is_empty() {
                relation.fallback.to_string()
            } else {
                name
            }
        }
    }
}
