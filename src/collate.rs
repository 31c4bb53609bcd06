//! Locale-aware title ordering used to break score ties.
//!
//! Approximates a root-locale collator in three levels: base letters
//! (accents and case folded away), then accents, then case with lowercase
//! sorting first.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| case_pattern(a).cmp(&case_pattern(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accented(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_pattern(s: &str) -> Vec<bool> {
    s.nfd().map(char::is_uppercase).collect()
}
