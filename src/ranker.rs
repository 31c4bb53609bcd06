//! Ranking and memoization of query results.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
        MutexGuard,
        PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::{
    collate::compare_titles,
    document::Document,
    scorer::score,
    tokenizer::{normalize_phrase, tokenize},
};

/// Cache key: the space-joined tokens and the lowercased raw query.
///
/// Kept as two fields instead of one delimited string so no query can
/// collide with another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    tokens: String,
    query: String,
}

impl CacheKey {
    pub fn new(tokens: &[String], query: &str) -> Self {
        Self {
            tokens: tokens.join(" "),
            query: query.to_lowercase(),
        }
    }
}

/// A document paired with its score for one query.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub document: &'a Document,
    pub score: u32,
}

/// Score every document, drop non-matches and sort best first.
///
/// Ties are broken by title in collation order; documents with equal
/// titles keep their index order.
pub fn rank<'a>(
    index: &'a [Document],
    tokens: &[String],
    query: &str,
) -> Vec<ScoredCandidate<'a>> {
    let mut candidates: Vec<ScoredCandidate<'a>> = index
        .iter()
        .filter_map(|document| {
            let score = score(document, tokens, query);
            (score > 0).then_some(ScoredCandidate { document, score })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| compare_titles(&a.document.title, &b.document.title))
    });
    candidates
}

/// Memoizing ranker. Entries are never evicted or replaced.
#[derive(Debug, Default)]
pub struct Ranker {
    cache: Mutex<HashMap<CacheKey, Arc<[Document]>>>,
    scoring_passes: AtomicUsize,
}

impl Ranker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranked matches for `query` over `index`.
    ///
    /// A blank query returns nothing without touching the index. Repeated
    /// queries return the stored sequence without scoring again. The cache
    /// is keyed by query alone, so a `Ranker` must only ever see one index.
    pub(crate) fn search(&self, index: &[Document], query: &str) -> Arc<[Document]> {
        if normalize_phrase(query).is_empty() {
            return Arc::from(Vec::new());
        }

        let tokens = tokenize(query);
        let key = CacheKey::new(&tokens, query);

        // Held across scoring so concurrent misses on one key rank it once.
        let mut cache = self.cache();
        if let Some(hit) = cache.get(&key) {
            tracing::debug!(query, "search cache hit");
            return Arc::clone(hit);
        }

        let ranked: Arc<[Document]> = rank(index, &tokens, query)
            .into_iter()
            .map(|candidate| candidate.document.clone())
            .collect();
        self.scoring_passes.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(query, matches = ranked.len(), "ranked query");

        cache.insert(key, Arc::clone(&ranked));
        ranked
    }

    /// Number of times the index has been scored, i.e. cache misses.
    pub fn scoring_passes(&self) -> usize {
        self.scoring_passes.load(Ordering::Relaxed)
    }

    pub fn cached_queries(&self) -> usize {
        self.cache().len()
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<CacheKey, Arc<[Document]>>> {
        // Entries are inserted whole, so a poisoned map is still consistent.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
