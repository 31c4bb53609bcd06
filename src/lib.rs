//! sitesearch - instant search over a static site's precomputed index.
//!
//! A site build emits its pages as a flat list of documents (URL, title,
//! plain-text content), either as `search-index.json` for served sites or
//! as `search-index.js` for sites opened from disk. This crate loads that
//! index exactly once, scores every document against a query, ranks and
//! memoizes the results and renders them for display.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sitesearch::{ExecutionContext, SearchEngine, SiteConfig, Transport};
//!
//! # async fn run() -> sitesearch::Result<()> {
//! let config = SiteConfig::default();
//! let context = ExecutionContext::from_location("https://example.org/wiki/")?;
//! let engine = Arc::new(SearchEngine::new(Transport::for_context(&context, &config)?));
//!
//! for doc in engine.search("fire sword").await.iter() {
//!     println!("{} {}", doc.url, doc.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod collate;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod loader;
pub mod orchestrator;
pub mod output;
pub mod ranker;
pub mod render;
pub mod scorer;
pub mod script;
pub mod source;
pub mod tokenizer;

pub use config::SiteConfig;
pub use document::Document;
pub use engine::SearchEngine;
pub use error::{Error, Result};
pub use loader::{IndexLoader, LoadState};
pub use orchestrator::{InputOutcome, QueryOrchestrator};
pub use render::{Markup, Renderer};
pub use source::{ExecutionContext, IndexSource, Transport};
