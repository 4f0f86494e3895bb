//! Static Knowledge Table entries.

use serde::{Deserialize, Serialize};

/// One canned answer in the offline table.
///
/// Keyword order matters only for reporting which keywords matched; scoring
/// treats the keywords as a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Table key, e.g. `"speed_limit"`; also the tie-break order
    pub topic: String,

    /// Language tag this entry answers in (`"en-US"`, `"de"`)
    pub language: String,

    pub keywords: Vec<String>,

    /// The canonical response text
    pub response: String,

    /// Intent reported when this entry wins
    pub intent: String,
}
