/// The phrase form of a query: trimmed and lowercased.
pub fn normalize_phrase(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Split a raw query into lowercase, whitespace-delimited tokens.
///
/// Order follows the query so the joined tokens are stable enough to key
/// the result cache. Empty or whitespace-only input yields no tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_and_blank_queries_have_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("\t\n ").is_empty());
    }

    #[test]
    fn lowercases_and_splits() {
        assert_eq!(tokenize("The Great Sword"), vec!["the", "great", "sword"]);
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        assert_eq!(tokenize("  fire \t  sword\n"), vec!["fire", "sword"]);
    }

    #[test]
    fn keeps_punctuation_and_duplicates() {
        assert_eq!(tokenize("Quest: quest"), vec!["quest:", "quest"]);
    }

    #[test]
    fn phrase_is_trimmed_and_lowercased() {
        assert_eq!(normalize_phrase("  Great Sword "), "great sword");
        assert_eq!(normalize_phrase(" \t"), "");
    }

    proptest! {
        #[test]
        fn tokens_are_nonempty_lowercase_words(query in "\\PC{0,40}") {
            for token in tokenize(&query) {
                prop_assert!(!token.is_empty());
                prop_assert!(!token.chars().any(char::is_whitespace));
                prop_assert_eq!(token.to_lowercase(), token);
            }
        }

        #[test]
        fn tokens_rejoin_to_phrase_words(query in "[a-zA-Z ]{0,40}") {
            let phrase = normalize_phrase(&query);
            let rejoined = tokenize(&query).join(" ");
            prop_assert_eq!(
                rejoined,
                phrase.split_whitespace().collect::<Vec<_>>().join(" ")
            );
        }
    }
}
