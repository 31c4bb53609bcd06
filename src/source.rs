//! Index transports.
//!
//! A served site fetches `search-index.json`; a site opened from disk has
//! no origin to fetch from and instead runs `search-index.js`, which assigns
//! the same array to a global. Which one applies is decided once, from an
//! explicit [`ExecutionContext`], when the [`Transport`] is built.

use std::{
    future::Future,
    path::{Path, PathBuf},
};

use reqwest::Url;
use serde_json::Value;

use crate::{
    config::SiteConfig,
    document::{self, Document},
    error::{Error, Result},
    script,
};

/// Something that can produce the full document list.
///
/// Called at most once per loader; errors are reported to the loader,
/// which decides how to recover.
pub trait IndexSource {
    fn load(&self) -> impl Future<Output = Result<Vec<Document>>> + Send;

    /// Short human-readable description for logs and status output.
    fn describe(&self) -> String;
}

/// Where the site is being viewed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Served over HTTP(S); `base` is the URL index paths resolve against.
    Networked { base: Url },
    /// Opened from the filesystem; `root` is the site directory.
    Local { root: PathBuf },
}

impl ExecutionContext {
    /// Classify a site location given as a URL or a filesystem path.
    ///
    /// `http` and `https` URLs are networked; `file` URLs and plain paths
    /// are local. A networked base without a trailing slash is treated as
    /// a directory.
    pub fn from_location(location: &str) -> Result<Self> {
        if let Ok(mut url) = Url::parse(location) {
            match url.scheme() {
                "http" | "https" => {
                    if !url.path().ends_with('/') {
                        let path = format!("{}/", url.path());
                        url.set_path(&path);
                    }
                    return Ok(Self::Networked { base: url });
                }
                "file" => {
                    let root = url.to_file_path().map_err(|()| {
                        Error::Config(format!(
                            "file URL has no local path: {location}"
                        ))
                    })?;
                    return Ok(Self::Local { root });
                }
                // Anything else (including Windows drive letters parsed as
                // a scheme) is a path.
                _ => {}
            }
        }
        Ok(Self::Local {
            root: PathBuf::from(location),
        })
    }
}

/// Fetch transport: GET a JSON array of documents.
#[derive(Debug, Clone)]
pub struct FetchSource {
    client: reqwest::Client,
    url: Url,
}

impl FetchSource {
    pub fn new(base: &Url, config: &SiteConfig) -> Result<Self> {
        let url = base.join(&config.json_index_path()).map_err(|e| {
            Error::Config(format!(
                "cannot resolve {} against {base}: {e}",
                config.json_index_path()
            ))
        })?;
        Ok(Self {
            client: reqwest::Client::new(),
            url,
        })
    }
}

impl IndexSource for FetchSource {
    async fn load(&self) -> Result<Vec<Document>> {
        tracing::debug!(url = %self.url, "fetching search index");
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        document::from_slice(&body)
    }

    fn describe(&self) -> String {
        format!("fetch {}", self.url)
    }
}

/// Injection transport: run the index script and read the global it
/// populates.
#[derive(Debug, Clone)]
pub struct ScriptSource {
    path: PathBuf,
    global: String,
}

impl ScriptSource {
    pub fn new(root: &Path, config: &SiteConfig) -> Self {
        Self {
            path: root.join(config.script_index_path()),
            global: config.global_name.clone(),
        }
    }
}

impl IndexSource for ScriptSource {
    async fn load(&self) -> Result<Vec<Document>> {
        tracing::debug!(path = %self.path.display(), "loading search index script");
        let text = tokio::fs::read_to_string(&self.path).await?;
        let mut globals = script::evaluate(&text)?;

        match globals.take(&self.global) {
            Some(value @ Value::Array(_)) => document::from_value(value),
            Some(other) => Err(Error::Format(format!(
                "`{}` is {}, not an array",
                self.global,
                document::json_kind(&other)
            ))),
            None => Err(Error::Format(format!(
                "script did not define `{}`",
                self.global
            ))),
        }
    }

    fn describe(&self) -> String {
        format!("script {}", self.path.display())
    }
}

/// The transport chosen for an execution context.
#[derive(Debug, Clone)]
pub enum Transport {
    Fetch(FetchSource),
    Script(ScriptSource),
}

impl Transport {
    pub fn for_context(
        context: &ExecutionContext,
        config: &SiteConfig,
    ) -> Result<Self> {
        let transport = match context {
            ExecutionContext::Networked { base } => {
                Self::Fetch(FetchSource::new(base, config)?)
            }
            ExecutionContext::Local { root } => {
                Self::Script(ScriptSource::new(root, config))
            }
        };
        tracing::debug!(transport = %transport.describe(), "selected index transport");
        Ok(transport)
    }
}

impl IndexSource for Transport {
    async fn load(&self) -> Result<Vec<Document>> {
        match self {
            Self::Fetch(source) => source.load().await,
            Self::Script(source) => source.load().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Fetch(source) => source.describe(),
            Self::Script(source) => source.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_site(script: &str) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("search-index.js"), script).unwrap();
        tmp
    }

    #[test]
    fn http_locations_are_networked() {
        let context =
            ExecutionContext::from_location("https://example.org/wiki").unwrap();
        match context {
            ExecutionContext::Networked { base } => {
                assert_eq!(base.as_str(), "https://example.org/wiki/");
            }
            other => panic!("expected networked context, got {other:?}"),
        }
    }

    #[test]
    fn paths_and_file_urls_are_local() {
        let context = ExecutionContext::from_location("./site").unwrap();
        assert_eq!(
            context,
            ExecutionContext::Local {
                root: PathBuf::from("./site")
            }
        );

        let context =
            ExecutionContext::from_location("file:///srv/site").unwrap();
        assert!(matches!(context, ExecutionContext::Local { .. }));
    }

    #[test]
    fn fetch_url_includes_prefix() {
        let base = Url::parse("http://localhost:8000/archive/").unwrap();
        let config = SiteConfig::default().with_prefix("site/");
        let source = FetchSource::new(&base, &config).unwrap();

        assert_eq!(
            source.describe(),
            "fetch http://localhost:8000/archive/site/search-index.json"
        );
    }

    #[test]
    fn transport_follows_context() {
        let config = SiteConfig::default();
        let networked = ExecutionContext::from_location("http://localhost/").unwrap();
        let local = ExecutionContext::from_location("/tmp/site").unwrap();

        assert!(matches!(
            Transport::for_context(&networked, &config).unwrap(),
            Transport::Fetch(_)
        ));
        assert!(matches!(
            Transport::for_context(&local, &config).unwrap(),
            Transport::Script(_)
        ));
    }

    #[tokio::test]
    async fn script_source_reads_global() {
        let site = write_site(
            r#"window.SEARCH_INDEX=[{"url":"/a","title":"Fire Sword","content":"deals fire damage"}];"#,
        );
        let source = ScriptSource::new(site.path(), &SiteConfig::default());

        let docs = source.load().await.unwrap();
        assert_eq!(docs, vec![Document::new("/a", "Fire Sword", "deals fire damage")]);
    }

    #[tokio::test]
    async fn script_source_honours_prefix() {
        let site = tempfile::tempdir().unwrap();
        std::fs::create_dir(site.path().join("site")).unwrap();
        std::fs::write(
            site.path().join("site/search-index.js"),
            "window.SEARCH_INDEX=[];",
        )
        .unwrap();
        let config = SiteConfig::default().with_prefix("site/");
        let source = ScriptSource::new(site.path(), &config);

        assert!(source.load().await.unwrap().is_empty());
        assert!(source.describe().contains("site/search-index.js"));
    }

    #[tokio::test]
    async fn script_source_missing_global_is_an_error() {
        let site = write_site("window.OTHER=[];");
        let source = ScriptSource::new(site.path(), &SiteConfig::default());

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[tokio::test]
    async fn script_source_non_array_global_is_an_error() {
        let site = write_site(r#"window.SEARCH_INDEX={"url":"/a"};"#);
        let source = ScriptSource::new(site.path(), &SiteConfig::default());

        let err = source.load().await.unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[tokio::test]
    async fn script_source_missing_file_is_io_error() {
        let site = tempfile::tempdir().unwrap();
        let source = ScriptSource::new(site.path(), &SiteConfig::default());

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
