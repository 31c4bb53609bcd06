use std::sync::Arc;

use serde::Serialize;

use crate::{
    document::Document,
    loader::{IndexLoader, LoadState},
    ranker::Ranker,
    source::IndexSource,
    tokenizer::normalize_phrase,
};

/// Process-wide search state: the index loaded once and the result cache.
///
/// Construct one per site and share it (e.g. behind an `Arc`) with every
/// entry point that searches.
pub struct SearchEngine<S> {
    loader: IndexLoader<S>,
    ranker: Ranker,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub transport: String,
    pub state: String,
    pub documents: Option<usize>,
    pub scoring_passes: usize,
    pub cached_queries: usize,
}

impl<S: IndexSource> SearchEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            loader: IndexLoader::new(source),
            ranker: Ranker::new(),
        }
    }

    /// Load the index if needed. Safe to call from any number of places.
    pub async fn load(&self) -> Arc<[Document]> {
        self.loader.load().await
    }

    /// Ranked documents matching `query`, best first.
    ///
    /// Blank queries return immediately without loading or scoring.
    pub async fn search(&self, query: &str) -> Arc<[Document]> {
        if normalize_phrase(query).is_empty() {
            return Arc::from(Vec::new());
        }
        let index = self.load().await;
        self.ranker.search(&index, query)
    }

    pub fn state(&self) -> LoadState {
        self.loader.state()
    }

    pub fn source(&self) -> &S {
        self.loader.source()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            transport: self.source().describe(),
            state: self.state().to_string(),
            documents: self.loader.get().map(|index| index.len()),
            scoring_passes: self.ranker.scoring_passes(),
            cached_queries: self.ranker.cached_queries(),
        }
    }
}
