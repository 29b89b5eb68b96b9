//! Localized field resolution

use portal_common::Language;

use crate::sources::{LocalizedField, RawRecord};

/// Column holding `field` in `language`
pub fn column_for(field: &LocalizedField, language: Language) -> &'static str {
    match language {
        Language::Ru => field.base,
        Language::En => field.en,
        Language::Be => field.be,
    }
}

/// Pick the value of `field` for `language`
///
/// The translated column is used when present and non-blank; otherwise the
/// base (Russian) column. Returns an empty string if neither is set.
pub fn resolve(record: &RawRecord, field: &LocalizedField, language: Language) -> String {
    let preferred = record
        .text(column_for(field, language))
        .filter(|value| !value.trim().is_empty());

    preferred
        .or_else(|| record.text(field.base))
        .unwrap_or_default()
        .to_string()
}
