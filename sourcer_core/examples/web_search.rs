use std::sync::Arc;

use sourcer_core::sources::web::WebSearchSource;
use sourcer_core::{Query, QueryType, SearchClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app_id = std::env::var("SOURCER_APP_ID").unwrap_or_else(|_| "demo".to_string());
    let client = SearchClient::new(Arc::new(WebSearchSource::new(app_id)))?;

    let query = Query::new("data clustering").with_type(QueryType::All);
    let response = client.query(&query, 0, 10).await?;

    println!("declared total: {:?}", response.results_total);
    for (i, record) in response.results.iter().enumerate() {
        println!("{:2}. {}", i + 1, record.field("Title").unwrap_or("(untitled)"));
        if let Some(url) = record.field("Url") {
            println!("    {}", url);
        }
    }
    println!(
        "metadata:\n{}",
        serde_json::to_string_pretty(&response.metadata)?
    );

    Ok(())
}
