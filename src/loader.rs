//! Load-once access to the document index.
//!
//! The first call to [`IndexLoader::load`] starts the transport; every
//! caller that arrives while it is in flight waits on the same operation,
//! and every later caller gets the stored result. A failed load is logged
//! and stored as an empty index; it is never retried.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

use tokio::sync::OnceCell;

use crate::{document::Document, source::IndexSource};

/// Where the loader is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Uninitialized,
    Loading,
    Ready,
    /// The transport failed; the index is empty.
    Failed,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
struct Loaded {
    documents: Arc<[Document]>,
    failed: bool,
}

pub struct IndexLoader<S> {
    source: S,
    loaded: OnceCell<Loaded>,
    started: AtomicBool,
}

impl<S: IndexSource> IndexLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            loaded: OnceCell::new(),
            started: AtomicBool::new(false),
        }
    }

    /// Return the index, loading it on first use.
    pub async fn load(&self) -> Arc<[Document]> {
        let loaded = self.loaded.get_or_init(|| self.load_from_source()).await;
        Arc::clone(&loaded.documents)
    }

    async fn load_from_source(&self) -> Loaded {
        self.started.store(true, Ordering::Release);
        let start = Instant::now();

        match self.source.load().await {
            Ok(documents) => {
                tracing::info!(
                    documents = documents.len(),
                    transport = %self.source.describe(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "search index loaded"
                );
                Loaded {
                    documents: documents.into(),
                    failed: false,
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    transport = %self.source.describe(),
                    "failed to load search index, continuing with no documents"
                );
                Loaded {
                    documents: Arc::from(Vec::new()),
                    failed: true,
                }
            }
        }
    }

    /// The index if it has finished loading.
    pub fn get(&self) -> Option<Arc<[Document]>> {
        self.loaded.get().map(|loaded| Arc::clone(&loaded.documents))
    }

    pub fn state(&self) -> LoadState {
        match self.loaded.get() {
            Some(loaded) if loaded.failed => LoadState::Failed,
            Some(_) => LoadState::Ready,
            None if self.started.load(Ordering::Acquire) => LoadState::Loading,
            None => LoadState::Uninitialized,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}


#[cfg(test)]
mod tests {
    use tokio::sync::Notify;

    use super::{test_support::StubSource, *};

    fn docs() -> Vec<Document> {
        vec![
            Document::new("/a", "Fire Sword", "deals fire damage"),
            Document::new("/b", "Ice Shield", "blocks fire attacks"),
        ]
    }

    #[tokio::test]
    async fn loads_once_across_sequential_calls() {
        let loader = IndexLoader::new(StubSource::new(docs()));
        assert_eq!(loader.state(), LoadState::Uninitialized);
        assert!(loader.get().is_none());

        let first = loader.load().await;
        let second = loader.load().await;

        assert_eq!(first.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.source().calls(), 1);
        assert_eq!(loader.state(), LoadState::Ready);
    }

    #[tokio::test]
    async fn concurrent_calls_share_one_load() {
        let gate = Arc::new(Notify::new());
        let loader = IndexLoader::new(StubSource::gated(docs(), Arc::clone(&gate)));

        let (a, b, c, ()) = tokio::join!(
            loader.load(),
            loader.load(),
            loader.load(),
            async {
                tokio::task::yield_now().await;
                assert_eq!(loader.state(), LoadState::Loading);
                gate.notify_one();
            }
        );

        assert_eq!(loader.source().calls(), 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&b, &c));
    }

    #[tokio::test]
    async fn failure_becomes_empty_index() {
        let loader = IndexLoader::new(StubSource::failing());

        let index = loader.load().await;
        assert!(index.is_empty());
        assert_eq!(loader.state(), LoadState::Failed);

        // Never retried.
        loader.load().await;
        assert_eq!(loader.source().calls(), 1);
    }
}
