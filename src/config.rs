use crate::script::DEFAULT_GLOBAL;

/// Maximum number of results shown at once.
pub const DEFAULT_DISPLAY_LIMIT: usize = 20;

/// Characters of content shown in a result snippet before truncation.
pub const DEFAULT_SNIPPET_CHARS: usize = 140;

pub const DEFAULT_JSON_INDEX: &str = "search-index.json";
pub const DEFAULT_SCRIPT_INDEX: &str = "search-index.js";

/// Deployment settings shared by the index transports and the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Prepended to index resource paths and to every result URL, so the
    /// site can live under a sub-path (e.g. `site/` or `../`).
    pub path_prefix: String,
    pub json_index: String,
    pub script_index: String,
    /// Global the index script assigns the document array to.
    pub global_name: String,
    pub display_limit: usize,
    pub snippet_chars: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            path_prefix: String::new(),
            json_index: DEFAULT_JSON_INDEX.to_string(),
            script_index: DEFAULT_SCRIPT_INDEX.to_string(),
            global_name: DEFAULT_GLOBAL.to_string(),
            display_limit: DEFAULT_DISPLAY_LIMIT,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
        }
    }
}

impl SiteConfig {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    /// Relative path of the JSON index, prefix included.
    pub fn json_index_path(&self) -> String {
        format!("{}{}", self.path_prefix, self.json_index)
    }

    /// Relative path of the index script, prefix included.
    pub fn script_index_path(&self) -> String {
        format!("{}{}", self.path_prefix, self.script_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_layout() {
        let config = SiteConfig::default();
        assert_eq!(config.path_prefix, "");
        assert_eq!(config.json_index_path(), "search-index.json");
        assert_eq!(config.script_index_path(), "search-index.js");
        assert_eq!(config.global_name, "SEARCH_INDEX");
        assert_eq!(config.display_limit, 20);
        assert_eq!(config.snippet_chars, 140);
    }

    #[test]
    fn prefix_applies_to_index_paths() {
        let config = SiteConfig::default().with_prefix("site/");
        assert_eq!(config.json_index_path(), "site/search-index.json");
        assert_eq!(config.script_index_path(), "site/search-index.js");
    }
}
