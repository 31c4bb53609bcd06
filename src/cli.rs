use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::{
    DEFAULT_DISPLAY_LIMIT,
    DEFAULT_JSON_INDEX,
    DEFAULT_SCRIPT_INDEX,
    SiteConfig,
};

#[derive(Debug, Parser)]
#[command(
    name = "sitesearch",
    about = "Instant search over a static site's precomputed document index"
)]
pub struct Cli {
    /// Site location: an http(s) URL or a local directory
    #[arg(long, global = true, default_value = ".")]
    pub site: String,

    /// Path prefix prepended to index resources and result URLs
    #[arg(long, global = true, env = "SITESEARCH_PREFIX", default_value = "")]
    pub prefix: String,

    /// File name of the JSON index (served sites)
    #[arg(long, global = true, default_value = DEFAULT_JSON_INDEX)]
    pub json_index: String,

    /// File name of the index script (local sites)
    #[arg(long, global = true, default_value = DEFAULT_SCRIPT_INDEX)]
    pub script_index: String,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig {
            path_prefix: self.prefix.clone(),
            json_index: self.json_index.clone(),
            script_index: self.script_index.clone(),
            ..SiteConfig::default()
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the index and print ranked results
    Search(SearchArgs),
    /// Print the URL of the best match, as submitting the search form would
    Go(GoArgs),
    /// Read queries from stdin, one per line, and print results as you go
    Interactive,
    /// Load the index and report its status
    Stats(StatsArgs),
    /// Write the index script for local sites from a JSON index
    Wrap(WrapArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Search --

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// The search query
    pub query: String,

    /// Number of results to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_DISPLAY_LIMIT)]
    pub count: usize,

    /// Show every match instead of the top results
    #[arg(long)]
    pub all: bool,

    /// Output results as JSON (fields HTML-escaped)
    #[arg(long)]
    pub json: bool,
}

// -- Go --

#[derive(Debug, Parser)]
pub struct GoArgs {
    /// The search query
    pub query: String,
}

// -- Stats --

#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Wrap --

#[derive(Debug, Parser)]
pub struct WrapArgs {
    /// JSON index to read (defaults to the site's JSON index)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Script to write (defaults to the site's index script)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "sitesearch",
            &mut std::io::stdout(),
        );
    }
}
