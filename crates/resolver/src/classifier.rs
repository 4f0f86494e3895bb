//! Query classification: lookup query vs. conversational utterance.
//!
//! A fixed heuristic, not a trained model. It is pure and deterministic.

/// How a message should be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// An information-seeking search; eligible for the structured search tier
    Lookup,
    /// Chit-chat, greetings, thanks
    Conversational,
}

const LOOKUP_INDICATORS: &[&str] = &[
    "search",
    "find",
    "look up",
    "search for",
    "where",
    "how to",
    "information about",
];

const INTERROGATIVES: &[&str] = &["what", "where", "how", "when", "which", "who", "why"];

/// Messages with more tokens than this are treated as lookups.
const LOOKUP_MIN_TOKENS: usize = 4;

/// Classify a message. Rules are evaluated in order; the first match wins.
pub fn classify(message: &str) -> QueryKind {
    let lower = message.to_lowercase();

    let has_indicator = LOOKUP_INDICATORS
        .iter()
        .any(|ind| lower.starts_with(ind) || lower.contains(&format!(" {ind} ")));
    if has_indicator {
        return QueryKind::Lookup;
    }

    if INTERROGATIVES.iter().any(|w| lower.starts_with(w)) {
        return QueryKind::Lookup;
    }

    if message.split_whitespace().count() > LOOKUP_MIN_TOKENS {
        return QueryKind::Lookup;
    }

    QueryKind::Conversational
}
