use std::sync::Arc;

use sourcer_core::sources::web::WebSearchSource;
use sourcer_core::{build_registry, Query, QueryType, SearchClient, SearchService};

use crate::cli::{Cli, OutputFormat};
use crate::commands::{CommandError, Result};
use crate::output;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    cli: &Cli,
    source: &str,
    query_text: &str,
    start: u32,
    results: u32,
    query_type: QueryType,
    language: Option<&str>,
    app_id: Option<&str>,
) -> Result<()> {
    let registry = build_registry();
    let service: Arc<dyn SearchService> = match (source, app_id) {
        // An explicit app id replaces the placeholder the registry ships with.
        ("web", Some(app_id)) => Arc::new(WebSearchSource::new(app_id)),
        _ => registry.get(source).ok_or_else(|| {
            CommandError::InvalidInput(format!(
                "unknown source '{}'; run `sourcer list` to see what is available",
                source
            ))
        })?,
    };

    let mut query = Query::new(query_text).with_type(query_type);
    if let Some(language) = language {
        query = query.with_language(language);
    }

    let client = SearchClient::new(service)?;
    let response = client.query(&query, start, results).await?;
    tracing::debug!(
        target: "sourcer_cli",
        results = response.results.len(),
        total = ?response.results_total,
        "search completed"
    );

    match cli.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Pretty => output::print_response(query_text, &response),
    }

    Ok(())
}
