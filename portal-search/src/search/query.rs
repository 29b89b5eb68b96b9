//! Query intake: trimming, language resolution and the short-query gate

use portal_common::Language;

/// Minimum number of characters (after trimming) for a search to run
pub const MIN_QUERY_CHARS: usize = 2;

/// A search request that passed the short-query gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed term passed to the sources
    pub term: String,
    /// Term exactly as received, echoed back in the response
    pub raw: String,
    pub language: Language,
}

/// Outcome of validating the incoming parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntake {
    Accepted(SearchQuery),
    /// Fewer than [`MIN_QUERY_CHARS`] characters; no source is contacted
    TooShort { language: Language },
}

/// Validate raw request parameters
///
/// A missing query is treated as empty. Length is counted in characters,
/// so a single Cyrillic letter is still too short.
pub fn intake(raw_query: Option<&str>, raw_language: Option<&str>) -> QueryIntake {
    let language = Language::parse_or_default(raw_language);
    let raw = raw_query.unwrap_or_default();
    let term = raw.trim();

    if term.chars().count() < MIN_QUERY_CHARS {
        return QueryIntake::TooShort { language };
    }

    QueryIntake::Accepted(SearchQuery {
        term: term.to_string(),
        raw: raw.to_string(),
        language,
    })
}

/// Message returned with an empty result set for a too-short query
pub fn too_short_message(language: Language) -> &'static str {
    match language {
        Language::Ru => "Запрос должен содержать минимум 2 символа",
        Language::En => "Query must be at least 2 characters long",
        Language::Be => "Запыт павінен змяшчаць мінімум 2 сімвалы",
    }
}
