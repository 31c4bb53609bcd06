//! Input and submit handling on top of [`SearchEngine`].
//!
//! Each input event is tagged with a sequence number when it arrives. A
//! completion whose number is no longer the latest issued is dropped, so a
//! slow early keystroke (one that had to wait for the index) cannot
//! overwrite the results of a later one.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    engine::SearchEngine,
    render::{RenderedPage, Renderer},
    source::IndexSource,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Show this page; an empty page means hide the results panel.
    Render(RenderedPage),
    /// A newer input arrived while this one was in flight.
    Stale { seq: u64, latest: u64 },
}

pub struct QueryOrchestrator<S> {
    engine: Arc<SearchEngine<S>>,
    renderer: Renderer,
    issued: AtomicU64,
}

impl<S: IndexSource> QueryOrchestrator<S> {
    pub fn new(engine: Arc<SearchEngine<S>>, renderer: Renderer) -> Self {
        Self {
            engine,
            renderer,
            issued: AtomicU64::new(0),
        }
    }

    pub fn engine(&self) -> &SearchEngine<S> {
        &self.engine
    }

    /// Handle a change of the search box to `value`.
    pub async fn on_input(&self, value: &str) -> InputOutcome {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        self.engine.load().await;
        let results = self.engine.search(value).await;

        let latest = self.issued.load(Ordering::SeqCst);
        if seq != latest {
            tracing::debug!(seq, latest, "dropping stale search results");
            return InputOutcome::Stale { seq, latest };
        }
        InputOutcome::Render(self.renderer.render(&results))
    }

    /// Handle form submission: the URL of the top result, if any.
    pub async fn on_submit(&self, value: &str) -> Option<String> {
        self.engine.load().await;
        let results = self.engine.search(value).await;
        results
            .first()
            .map(|document| self.renderer.display_url(document))
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        config::SiteConfig,
        document::Document,
        loader::test_support::StubSource,
        render::Markup,
    };

    fn docs() -> Vec<Document> {
        vec![
            Document::new("/a", "Fire Sword", "deals fire damage"),
            Document::new("/b", "Ice Shield", "blocks fire attacks"),
        ]
    }

    fn orchestrator(source: StubSource, prefix: &str) -> QueryOrchestrator<StubSource> {
        let config = SiteConfig::default().with_prefix(prefix);
        QueryOrchestrator::new(
            Arc::new(SearchEngine::new(source)),
            Renderer::new(&config, Markup::Html),
        )
    }

    #[tokio::test]
    async fn input_renders_ranked_results() {
        let orchestrator = orchestrator(StubSource::new(docs()), "");

        match orchestrator.on_input("fire").await {
            InputOutcome::Render(page) => {
                let urls: Vec<&str> =
                    page.results.iter().map(|r| r.display_url.as_str()).collect();
                assert_eq!(urls, vec!["/a", "/b"]);
            }
            other => panic!("expected rendered page, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_input_renders_empty_page() {
        let orchestrator = orchestrator(StubSource::new(docs()), "");

        match orchestrator.on_input("").await {
            InputOutcome::Render(page) => assert!(page.is_empty()),
            other => panic!("expected rendered page, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn earlier_input_completing_late_is_dropped() {
        let gate = Arc::new(Notify::new());
        let orchestrator =
            orchestrator(StubSource::gated(docs(), Arc::clone(&gate)), "");

        let (early, late, ()) = tokio::join!(
            orchestrator.on_input("ice"),
            orchestrator.on_input("fire"),
            async {
                tokio::task::yield_now().await;
                gate.notify_one();
            }
        );

        assert_eq!(early, InputOutcome::Stale { seq: 1, latest: 2 });
        match late {
            InputOutcome::Render(page) => assert_eq!(page.total, 2),
            other => panic!("expected rendered page, got {other:?}"),
        }
        assert_eq!(orchestrator.engine().source().calls(), 1);
    }

    #[tokio::test]
    async fn submit_navigates_to_top_result() {
        let orchestrator = orchestrator(StubSource::new(docs()), "/wiki");
        assert_eq!(
            orchestrator.on_submit("fire").await.as_deref(),
            Some("/wiki/a")
        );
    }

    #[tokio::test]
    async fn submit_without_matches_stays_put() {
        let orchestrator = orchestrator(StubSource::new(docs()), "");
        assert_eq!(orchestrator.on_submit("potion").await, None);
        assert_eq!(orchestrator.on_submit("").await, None);
    }
}
