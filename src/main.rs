use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use sitesearch::{
    ExecutionContext,
    InputOutcome,
    Markup,
    QueryOrchestrator,
    Renderer,
    SearchEngine,
    SiteConfig,
    Transport,
    cli::{Cli, Command, SearchArgs, WrapArgs},
    document,
    error::{self, Error},
    output,
    script,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

type Engine = Arc<SearchEngine<Transport>>;

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("SITESEARCH_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let config = cli.site_config();

    match cli.command {
        Command::Search(args) => {
            let engine = open_engine(&cli.site, &config)?;
            cmd_search(engine, &config, &args).await?;
        }
        Command::Go(args) => {
            let engine = open_engine(&cli.site, &config)?;
            cmd_go(engine, &config, &args.query).await?;
        }
        Command::Interactive => {
            let engine = open_engine(&cli.site, &config)?;
            cmd_interactive(engine, &config).await?;
        }
        Command::Stats(args) => {
            let engine = open_engine(&cli.site, &config)?;
            engine.load().await;
            output::format_stats(&engine.stats(), args.json)?;
        }
        Command::Wrap(args) => {
            cmd_wrap(&cli.site, &config, &args).await?;
        }
        Command::Completions(args) => {
            args.generate();
        }
    }

    Ok(())
}

/// Pick the transport for `site` and build the engine around it.
fn open_engine(site: &str, config: &SiteConfig) -> error::Result<Engine> {
    let context = ExecutionContext::from_location(site)?;
    let transport = Transport::for_context(&context, config)?;
    Ok(Arc::new(SearchEngine::new(transport)))
}

async fn cmd_search(
    engine: Engine,
    config: &SiteConfig,
    args: &SearchArgs,
) -> error::Result<()> {
    let markup = if args.json { Markup::Html } else { Markup::Plain };
    let limit = if args.all { None } else { Some(args.count) };
    let orchestrator = QueryOrchestrator::new(
        engine,
        Renderer::new(config, markup).with_limit(limit),
    );

    // A single input can never be superseded.
    if let InputOutcome::Render(page) = orchestrator.on_input(&args.query).await {
        if args.json {
            output::format_json(&page, &args.query)?;
        } else {
            output::format_human(&page);
        }
    }
    Ok(())
}

async fn cmd_go(
    engine: Engine,
    config: &SiteConfig,
    query: &str,
) -> error::Result<()> {
    let orchestrator =
        QueryOrchestrator::new(engine, Renderer::new(config, Markup::Plain));

    match orchestrator.on_submit(query).await {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None => Err(Error::NotFound {
            kind: "match",
            name: query.to_string(),
        }),
    }
}

/// Each stdin line is an edit of the search box; `:go QUERY` submits.
async fn cmd_interactive(engine: Engine, config: &SiteConfig) -> error::Result<()> {
    let orchestrator =
        QueryOrchestrator::new(engine, Renderer::new(config, Markup::Plain));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if let Some(query) = line.strip_prefix(":go ") {
            match orchestrator.on_submit(query).await {
                Some(url) => println!("-> {url}"),
                None => println!("No results."),
            }
            continue;
        }

        match orchestrator.on_input(&line).await {
            InputOutcome::Render(page) => output::format_human(&page),
            InputOutcome::Stale { seq, latest } => {
                tracing::debug!(seq, latest, "skipped superseded query");
            }
        }
    }
    Ok(())
}

async fn cmd_wrap(
    site: &str,
    config: &SiteConfig,
    args: &WrapArgs,
) -> error::Result<()> {
    let root = match ExecutionContext::from_location(site)? {
        ExecutionContext::Local { root } => Some(root),
        ExecutionContext::Networked { .. } => None,
    };
    let resolve = |explicit: &Option<PathBuf>, name: String| {
        explicit
            .clone()
            .or_else(|| root.as_ref().map(|root| root.join(&name)))
            .ok_or_else(|| {
                Error::Config(format!(
                    "--site is a URL; pass the path for {name} explicitly"
                ))
            })
    };
    let input = resolve(&args.input, config.json_index_path())?;
    let output = resolve(&args.output, config.script_index_path())?;

    let documents = document::from_slice(&tokio::fs::read(&input).await?)?;
    let script = script::wrap_index(&documents, &config.global_name)?;
    tokio::fs::write(&output, script).await?;

    eprintln!(
        "Wrote {} document(s) from {} to {}",
        documents.len(),
        input.display(),
        output.display()
    );
    Ok(())
}
