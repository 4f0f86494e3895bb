//! Markup stripping and candidate block extraction.

use driversfriend_core::error::RetrievalError;
use driversfriend_core::text::collapse_whitespace;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Blocks shorter than this are headings fragments or UI labels.
pub const MIN_BLOCK_CHARS: usize = 20;

/// Above this share of link text a block is treated as navigation.
const MAX_LINK_TEXT_RATIO: f32 = 0.5;

const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form",
];

const EXCLUDED_MARKERS: &[&str] = &["nav", "menu", "sidebar", "cookie", "breadcrumb"];

fn selector(css: &str) -> Result<Selector, RetrievalError> {
    Selector::parse(css).map_err(|e| RetrievalError::Parse(format!("selector {css}: {e}")))
}

/// Whether the element or any ancestor below `root` is a non-content container.
fn is_excluded(element: &ElementRef<'_>, root: &ElementRef<'_>) -> bool {
    std::iter::once(*element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .take_while(|el| el != root)
        .any(|el| {
            let value = el.value();
            if EXCLUDED_TAGS.contains(&value.name()) {
                return true;
            }
            let marker = format!(
                "{} {}",
                value.attr("class").unwrap_or_default(),
                value.id().unwrap_or_default()
            )
            .to_lowercase();
            EXCLUDED_MARKERS.iter().any(|m| marker.contains(m))
        })
}

/// Extract readable text blocks from a document, in document order.
///
/// Content is taken from the first `<main>` or `<article>` element when
/// present, otherwise from `<body>`. Markers on the root and its ancestors
/// are ignored. Duplicate blocks are dropped.
pub fn extract_blocks(html: &str) -> Result<Vec<String>, RetrievalError> {
    let document = Html::parse_document(html);
    let root_selector = selector("main, article")?;
    let block_selector = selector("h1, h2, h3, h4, p, li")?;
    let link_selector = selector("a")?;

    let body_selector = selector("body")?;

    let root = document
        .select(&root_selector)
        .next()
        .or_else(|| document.select(&body_selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut seen = HashSet::new();
    let mut blocks = Vec::new();
    for element in root.select(&block_selector) {
        if is_excluded(&element, &root) {
            continue;
        }

        let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
        let total_chars = text.chars().count();
        if total_chars < MIN_BLOCK_CHARS {
            continue;
        }

        let link_chars: usize = element
            .select(&link_selector)
            .map(|a| collapse_whitespace(&a.text().collect::<String>()).chars().count())
            .sum();
        if link_chars as f32 / total_chars as f32 > MAX_LINK_TEXT_RATIO {
            continue;
        }

        if seen.insert(text.clone()) {
            blocks.push(text);
        }
    }
    Ok(blocks)
}

/// Split a block into sentences at `.`, `!` or `?` followed by whitespace.
///
/// Decimal numbers such as "0.5" stay intact.
pub fn split_sentences(block: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = block.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
            if at_boundary {
                let end = idx + c.len_utf8();
                let sentence = block[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = end;
            }
        }
    }
    let rest = block[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}
