//! Additive relevance scoring of one document against a query.
//!
//! Every comparison is case-insensitive. The whole query (the phrase) and
//! each token contribute independently, so a document that matches the
//! phrase exactly also collects the "contains" points for it.

use crate::{document::Document, tokenizer::normalize_phrase};

pub const TITLE_EQUALS_PHRASE: u32 = 1000;
pub const TITLE_CONTAINS_PHRASE: u32 = 200;
pub const CONTENT_CONTAINS_PHRASE: u32 = 50;
pub const TITLE_EQUALS_TOKEN: u32 = 20;
pub const TITLE_CONTAINS_TOKEN: u32 = 8;
pub const CONTENT_CONTAINS_TOKEN: u32 = 1;

/// Score `document` against `tokens` and the raw query.
///
/// A blank query scores zero: the empty phrase would otherwise be a
/// substring of every title.
pub fn score(document: &Document, tokens: &[String], query: &str) -> u32 {
    let phrase = normalize_phrase(query);
    if phrase.is_empty() {
        return 0;
    }

    let title = document.title.to_lowercase();
    let content = document.content.to_lowercase();
    let mut total = 0;

    if title == phrase {
        total += TITLE_EQUALS_PHRASE;
    }
    if title.contains(&phrase) {
        total += TITLE_CONTAINS_PHRASE;
    }
    if content.contains(&phrase) {
        total += CONTENT_CONTAINS_PHRASE;
    }

    for token in tokens {
        if title == *token {
            total += TITLE_EQUALS_TOKEN;
        }
        if title.contains(token.as_str()) {
            total += TITLE_CONTAINS_TOKEN;
        }
        if content.contains(token.as_str()) {
            total += CONTENT_CONTAINS_TOKEN;
        }
    }

    total
}
