//! The Regulation record held by the Knowledge Store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::language::tag_matches;

/// A single driving regulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regulation {
    /// Category key, e.g. `speed_limit` or `alcohol_limit`
    pub category: String,

    /// Country the rule applies to
    pub country: String,

    /// The regulation text shown to users
    pub content: String,

    /// Language tags this record is written for (e.g. `["en-US", "en-GB"]`)
    #[serde(alias = "language")]
    pub languages: Vec<String>,

    /// Lookup keywords; never empty
    pub keywords: Vec<String>,

    /// Legal reference or publisher
    pub source: String,

    /// Fine in euros, when the rule carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fine_amount: Option<f64>,

    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Regulation {
    /// Check the record invariants before insertion.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(StoreError::InvalidRecord(format!(
                "regulation '{}' has no keywords",
                self.category
            )));
        }
        if self.languages.iter().all(|l| l.trim().is_empty()) {
            return Err(StoreError::InvalidRecord(format!(
                "regulation '{}' has no language tag",
                self.category
            )));
        }
        if self.category.trim().is_empty() {
            return Err(StoreError::InvalidRecord("category must not be empty".into()));
        }
        Ok(())
    }

    /// Whether any stored language tag satisfies `language`.
    pub fn matches_language(&self, language: &str) -> bool {
        self.languages.iter().any(|l| tag_matches(l, language))
    }

    /// Whether this record's keyword set intersects `keywords`.
    ///
    /// Comparison uses full Unicode lowercasing, so "Überholen" matches
    /// "überholen".
    pub fn matches_any_keyword(&self, keywords: &[String]) -> bool {
        let wanted: Vec<String> = keywords.iter().map(|q| q.to_lowercase()).collect();
        self.keywords
            .iter()
            .any(|k| wanted.contains(&k.to_lowercase()))
    }
}
