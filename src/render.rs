//! Turning ranked documents into displayable results.

use serde::Serialize;

use crate::{config::SiteConfig, document::Document};

/// Appended to a snippet whose content was cut short.
pub const ELLIPSIS: &str = "…";

/// How text fields are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Escaped for insertion into an HTML page.
    Html,
    /// As-is, for terminals.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedResult {
    pub display_url: String,
    pub title: String,
    pub snippet: String,
}

/// One screenful of results. Empty means "no matches": hide the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub results: Vec<RenderedResult>,
    /// Matches before the display cap was applied.
    pub total: usize,
}

impl RenderedPage {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    path_prefix: String,
    limit: Option<usize>,
    snippet_chars: usize,
    markup: Markup,
}

impl Renderer {
    pub fn new(config: &SiteConfig, markup: Markup) -> Self {
        Self {
            path_prefix: config.path_prefix.clone(),
            limit: Some(config.display_limit),
            snippet_chars: config.snippet_chars,
            markup,
        }
    }

    /// Override the display cap; `None` shows every match.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn render(&self, results: &[Document]) -> RenderedPage {
        let shown = self.limit.unwrap_or(results.len());
        RenderedPage {
            results: results
                .iter()
                .take(shown)
                .map(|document| self.render_one(document))
                .collect(),
            total: results.len(),
        }
    }

    pub fn render_one(&self, document: &Document) -> RenderedResult {
        let snippet = snippet(&document.content, self.snippet_chars);
        RenderedResult {
            display_url: self.display_url(document),
            title: self.text(&document.title),
            snippet: self.text(&snippet),
        }
    }

    /// The link target for a result, prefix included.
    pub fn display_url(&self, document: &Document) -> String {
        format!("{}{}", self.path_prefix, document.url)
    }

    fn text(&self, s: &str) -> String {
        match self.markup {
            Markup::Html => escape_html(s),
            Markup::Plain => s.to_string(),
        }
    }
}

/// The first `max_chars` characters of `content`, plus [`ELLIPSIS`] when
/// anything was cut.
pub fn snippet(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}{ELLIPSIS}", &content[..end]),
        None => content.to_string(),
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
