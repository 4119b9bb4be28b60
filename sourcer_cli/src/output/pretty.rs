//! Pretty formatter for terminal output.
//!
//! Record fields are a pass-through of whatever the remote schema provides,
//! so rendering scans a few well-known key spellings instead of assuming a
//! fixed shape.

use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use owo_colors::OwoColorize;
use sourcer_core::{Record, SearchResponse, SourceInfo, COMPRESSION_KEY, FIRST_INDEX_KEY};

/// Keys tried, in order, for a record's headline.
const TITLE_KEYS: &[&str] = &["Title", "title", "name", "headline"];

const URL_KEYS: &[&str] = &["Url", "url", "ClickUrl", "link", "href"];

const SNIPPET_KEYS: &[&str] = &["Summary", "summary", "snippet", "description", "abstract"];

const SNIPPET_WIDTH: usize = 160;

pub fn print_response(query: &str, response: &SearchResponse) {
    let total = response
        .results_total
        .map(|t| t.to_string())
        .unwrap_or_else(|| "?".to_string());
    let compression = response
        .metadata
        .get(COMPRESSION_KEY)
        .map(String::as_str)
        .unwrap_or("unknown");

    println!(
        "{} {} of {} results for \"{}\" {}",
        "»".cyan(),
        response.results.len(),
        total,
        query.bold(),
        format!("({})", compression).dimmed()
    );
    if let Some(first) = response.metadata.get(FIRST_INDEX_KEY) {
        println!("{}", format!("  first index: {}", first).dimmed());
    }
    println!();

    for (i, record) in response.results.iter().enumerate() {
        print_record(i + 1, record);
    }
}

fn print_record(number: usize, record: &Record) {
    let title = pick(record, TITLE_KEYS).unwrap_or("(untitled)");
    println!("{:3}. {}", number, title.bold());
    if let Some(url) = pick(record, URL_KEYS) {
        println!("     {}", url.blue());
    }
    if let Some(snippet) = pick(record, SNIPPET_KEYS) {
        println!("     {}", truncate(snippet, SNIPPET_WIDTH));
    }
    println!();
}

fn pick<'a>(record: &'a Record, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .copied()
        .find_map(|key| record.field(key))
        .filter(|value| !value.is_empty())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}…", cut.trim_end())
    }
}

pub fn print_sources(sources: &[SourceInfo]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["name", "endpoint", "page size"]);
    for source in sources {
        table.add_row(vec![
            source.name.clone(),
            source.service_uri.clone(),
            source.results_per_page.to_string(),
        ]);
    }
    println!("{table}");
}
