//! Lexical sentence scoring against a query.

use driversfriend_core::text::{contains_whole_word, tokenize};
use regex_lite::Regex;
use std::sync::LazyLock;

/// Bonus for a numeric value with a unit relevant to the topic.
pub const UNIT_BONUS: f32 = 5.0;

/// Penalty per boilerplate phrase found in a sentence.
pub const BOILERPLATE_PENALTY: f32 = 10.0;

/// Query terms shorter than this are ignored.
const MIN_TERM_CHARS: usize = 3;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "what", "which", "how", "when", "where", "who", "why", "does",
    "can", "with", "about", "from", "this", "that", "there", "have", "you", "your", "der", "die",
    "das", "und", "ist", "wie", "was", "wo", "mit", "für", "ein", "eine", "ich", "sie",
];

const BOILERPLATE: &[&str] = &[
    "cookie",
    "subscribe",
    "newsletter",
    "privacy policy",
    "all rights reserved",
    "click here",
    "read more",
];

static SPEED_UNITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+\s*(km/h|kmh|mph)").expect("speed unit pattern"));
static ALCOHOL_UNITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+([.,]\d+)?\s*(%|‰|promille|per mille)").expect("alcohol unit pattern")
});
static MONEY_UNITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(€\s*\d+|\d+\s*(€|euro|eur\b))").expect("money unit pattern")
});
static DISTANCE_UNITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*(m|meters|metres|minutes|min|hours)\b").expect("distance unit pattern")
});

fn unit_patterns(topic: &str) -> Vec<&'static Regex> {
    match topic {
        "speed_limit" | "autobahn" => vec![&*SPEED_UNITS],
        "alcohol_limit" => vec![&*ALCOHOL_UNITS, &*MONEY_UNITS],
        "fines" => vec![&*MONEY_UNITS],
        "parking" => vec![&*DISTANCE_UNITS, &*MONEY_UNITS],
        _ => vec![&*SPEED_UNITS, &*ALCOHOL_UNITS, &*MONEY_UNITS],
    }
}

/// Scores sentences for one query/topic pair.
pub struct SentenceScorer {
    terms: Vec<String>,
    units: Vec<&'static Regex>,
}

impl SentenceScorer {
    pub fn new(query: &str, topic: &str) -> Self {
        let mut terms: Vec<String> = Vec::new();
        for token in tokenize(query) {
            if token.chars().count() >= MIN_TERM_CHARS
                && !STOPWORDS.contains(&token.as_str())
                && !terms.contains(&token)
            {
                terms.push(token);
            }
        }
        Self {
            terms,
            units: unit_patterns(topic),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Score a sentence. Only sentences sharing at least one term with the
    /// query can score above zero.
    pub fn score(&self, sentence: &str) -> f32 {
        let lower = sentence.to_lowercase();
        let mut score = 0.0;
        for term in &self.terms {
            if lower.contains(term.as_str()) {
                let increment = term.chars().count() as f32;
                score += if contains_whole_word(&lower, term) {
                    increment * 2.0
                } else {
                    increment
                };
            }
        }
        if score == 0.0 {
            return 0.0;
        }

        if self.units.iter().any(|re| re.is_match(sentence)) {
            score += UNIT_BONUS;
        }
        let boilerplate = BOILERPLATE.iter().filter(|p| lower.contains(*p)).count();
        score - boilerplate as f32 * BOILERPLATE_PENALTY
    }
}
