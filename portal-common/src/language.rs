//! Site language codes
//!
//! The site is published in Russian (base language), English and Belarusian.
//! Every multilingual text column is stored as a triple: `field` (ru),
//! `field_en` and `field_be`.

/// Display language requested by a site visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Russian, the base language every record is guaranteed to carry
    #[default]
    Ru,
    En,
    Be,
}

impl Language {
    /// Parse a language code leniently.
    ///
    /// Missing or unrecognized codes resolve to [`Language::Ru`]; matching is
    /// case-insensitive and ignores surrounding whitespace.
    pub fn parse_or_default(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_ascii_lowercase()).as_deref() {
            Some("en") => Language::En,
            Some("be") => Language::Be,
            _ => Language::Ru,
        }
    }

    /// Two-letter code used in query strings and logs
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
            Language::Be => "be",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
