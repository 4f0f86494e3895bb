//! Language tags and template localization.
//!
//! Every user-facing template exists in exactly two variants: English (the
//! default) and German, selected by a prefix test on the request's tag.

use serde::{Deserialize, Serialize};

/// The localization variant chosen for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    German,
}

impl Language {
    /// Resolve a language tag such as `"en-US"` or `"de"`.
    ///
    /// Anything that does not start with `de` falls back to English.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("de") {
            Self::German
        } else {
            Self::English
        }
    }

    /// Canonical tag used to key per-language tables.
    pub fn canonical_tag(self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::German => "de",
        }
    }

    /// Pick the variant of a two-language template.
    pub fn pick<T>(self, english: T, german: T) -> T {
        match self {
            Self::English => english,
            Self::German => german,
        }
    }
}

/// Whether a stored language tag satisfies a query tag.
///
/// Matches exactly (case-insensitive) or by subtag prefix in either
/// direction: a query for `"en"` matches a stored `"en-US"`, and a query for
/// `"de-AT"` matches a stored `"de"`.
pub fn tag_matches(stored: &str, query: &str) -> bool {
    let stored = stored.trim().to_ascii_lowercase();
    let query = query.trim().to_ascii_lowercase();
    if stored.is_empty() || query.is_empty() {
        return false;
    }
    stored == query
        || stored.starts_with(&format!("{query}-"))
        || query.starts_with(&format!("{stored}-"))
}
