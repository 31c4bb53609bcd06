//! Terminal output for the CLI.

use serde::Serialize;

use crate::{engine::EngineStats, error::Result, render::RenderedPage};

#[derive(Serialize)]
struct JsonResults<'a> {
    query: &'a str,
    total: usize,
    count: usize,
    results: &'a [crate::render::RenderedResult],
}

/// Format results for human-readable terminal output.
pub fn format_human(page: &RenderedPage) {
    if page.is_empty() {
        println!("No results.");
        return;
    }

    for (i, r) in page.results.iter().enumerate() {
        println!("{:>3}. {}", i + 1, r.display_url);
        if !r.title.is_empty() {
            println!("     {}", r.title);
        }
        if !r.snippet.is_empty() {
            println!("     {}", r.snippet);
        }
    }

    if page.total > page.results.len() {
        println!("\n{} of {} result(s)", page.results.len(), page.total);
    } else {
        println!("\n{} result(s)", page.total);
    }
}

/// Format results as JSON output.
pub fn format_json(page: &RenderedPage, query: &str) -> Result<()> {
    let out = JsonResults {
        query,
        total: page.total,
        count: page.results.len(),
        results: &page.results,
    };
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}

pub fn format_stats(stats: &EngineStats, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(stats)?);
        return Ok(());
    }

    println!("Transport: {}", stats.transport);
    println!("State: {}", stats.state);
    match stats.documents {
        Some(n) => println!("Documents: {n}"),
        None => println!("Documents: -"),
    }
    Ok(())
}
