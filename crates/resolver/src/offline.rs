//! Static Knowledge Table: the offline last resort.
//!
//! Each entry is scored against the lowercased message: every keyword that
//! occurs as a substring adds its length, doubled when it occurs as a whole
//! word. The strictly highest score wins; equal scores resolve to the
//! lexicographically smallest topic key.

use crate::builtin;
use driversfriend_core::error::Error;
use driversfriend_core::knowledge::KnowledgeEntry;
use driversfriend_core::language::Language;
use driversfriend_core::text::contains_whole_word;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// A scored table hit.
#[derive(Debug, Clone, PartialEq)]
pub struct OfflineMatch {
    pub entry: KnowledgeEntry,
    pub score: usize,
    /// Matched keywords in the entry's declaration order
    pub matched_keywords: Vec<String>,
}

/// On-disk table format.
#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    entries: Vec<KnowledgeEntry>,
}

#[derive(Debug, Clone)]
pub struct StaticKnowledgeTable {
    entries: Vec<KnowledgeEntry>,
}

impl StaticKnowledgeTable {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    /// The built-in English and German tables.
    pub fn builtin() -> Self {
        let mut entries = Vec::new();
        for (language, table) in [
            (Language::English, builtin::ENGLISH),
            (Language::German, builtin::GERMAN),
        ] {
            for (topic, intent, keywords, response) in table {
                entries.push(KnowledgeEntry {
                    topic: (*topic).to_string(),
                    language: language.canonical_tag().to_string(),
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                    response: (*response).to_string(),
                    intent: (*intent).to_string(),
                });
            }
        }
        Self { entries }
    }

    /// Parse a TOML table (`[[entries]]` blocks).
    pub fn from_toml_str(raw: &str) -> Result<Self, Error> {
        let file: TableFile = toml::from_str(raw).map_err(|e| Error::Config {
            message: format!("Invalid knowledge table: {e}"),
        })?;
        if let Some(bad) = file.entries.iter().find(|e| e.keywords.is_empty()) {
            return Err(Error::Config {
                message: format!("Knowledge entry '{}' has no keywords", bad.topic),
            });
        }
        Ok(Self::new(file.entries))
    }

    /// Load a TOML table from disk, replacing the built-in one.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Cannot read knowledge table {}: {e}", path.display()),
        })?;
        let table = Self::from_toml_str(&raw)?;
        info!(path = %path.display(), entries = table.len(), "Loaded knowledge table");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the best entry for `message` in the language selected by `language_tag`.
    pub fn lookup(&self, message: &str, language_tag: &str) -> Option<OfflineMatch> {
        let language = Language::from_tag(language_tag);
        let lower = message.to_lowercase();

        let mut best: Option<OfflineMatch> = None;
        for entry in self
            .entries
            .iter()
            .filter(|e| Language::from_tag(&e.language) == language)
        {
            let (score, matched_keywords) = score_entry(entry, &lower);
            if score == 0 {
                continue;
            }
            let better = best.as_ref().is_none_or(|b| {
                score > b.score || (score == b.score && entry.topic < b.entry.topic)
            });
            if better {
                best = Some(OfflineMatch {
                    entry: entry.clone(),
                    score,
                    matched_keywords,
                });
            }
        }

        if let Some(hit) = &best {
            debug!(
                topic = %hit.entry.topic,
                score = hit.score,
                matched = ?hit.matched_keywords,
                "Offline table match"
            );
        }
        best
    }
}

impl Default for StaticKnowledgeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn score_entry(entry: &KnowledgeEntry, lower_message: &str) -> (usize, Vec<String>) {
    let mut score = 0;
    let mut matched = Vec::new();
    for keyword in &entry.keywords {
        let keyword = keyword.to_lowercase();
        if keyword.is_empty() || !lower_message.contains(&keyword) {
            continue;
        }
        let increment = keyword.chars().count();
        score += if contains_whole_word(lower_message, &keyword) {
            increment * 2
        } else {
            increment
        };
        matched.push(keyword);
    }
    (score, matched)
}
