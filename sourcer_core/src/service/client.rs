use std::io::Read;
use std::sync::Arc;

use reqwest::header::ACCEPT_ENCODING;
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::error::SourceError;
use crate::query::Query;
use crate::response::{SearchResponse, COMPRESSION_KEY, FIRST_INDEX_KEY};
use crate::service::{decode, parse, SearchService};
use crate::transport::{self, HttpConfig};

/// Executes search requests against one service variant.
///
/// A client is cheap to share: per-call state lives on the stack of the
/// call, connections are pooled inside reqwest, and the strategy is
/// immutable. Every request is a single attempt; retrying is the caller's
/// decision.
pub struct SearchClient {
    http: reqwest::Client,
    service: Arc<dyn SearchService>,
}

impl SearchClient {
    pub fn new(service: Arc<dyn SearchService>) -> Result<Self, SourceError> {
        Self::with_config(service, &HttpConfig::default())
    }

    pub fn with_config(
        service: Arc<dyn SearchService>,
        config: &HttpConfig,
    ) -> Result<Self, SourceError> {
        Ok(SearchClient {
            http: transport::timeouting_client(config)?,
            service,
        })
    }

    pub fn service(&self) -> &dyn SearchService {
        self.service.as_ref()
    }

    /// Sends one search query and parses the result. `start` is the
    /// caller's 0-based offset; the provider's result indices begin at 1.
    pub async fn query(
        &self,
        query: &Query,
        start: u32,
        count: u32,
    ) -> Result<SearchResponse, SourceError> {
        let metadata = self.service.metadata();
        let first = start + 1;
        let count = count.min(metadata.results_per_page);

        let mut params = self.service.request_params(query, first, count);
        params.push(("output".to_string(), "xml".to_string()));

        let mut url = Url::parse(self.service.service_uri())
            .map_err(|e| SourceError::Config(format!("invalid service URI: {}", e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &params {
                pairs.append_pair(name, value);
            }
        }

        debug!(
            target: "sourcer::service",
            service = self.service.name(),
            url = %url,
            "sending search request"
        );

        let response = self
            .http
            .get(url)
            .header(ACCEPT_ENCODING, "gzip")
            .send()
            .await?;

        let status = response.status();
        let compression = decode::negotiated_compression(response.headers());
        let body = response.bytes().await?;

        match status {
            // The service embeds its own error detail inside the XML body
            // for 503 and 400; those bodies parse like any other response.
            StatusCode::OK | StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_REQUEST => {
                let reader = decode::body_reader(body, compression);
                let mut parsed = parse::parse_response(reader, self.service.schema())?;
                parsed
                    .metadata
                    .insert(COMPRESSION_KEY.to_string(), compression.label().to_string());

                debug!(
                    target: "sourcer::service",
                    service = self.service.name(),
                    results = parsed.results.len(),
                    total = ?parsed.results_total,
                    first = parsed.metadata.get(FIRST_INDEX_KEY).map(String::as_str).unwrap_or(""),
                    compression = compression.label(),
                    "received search response"
                );

                Ok(parsed)
            }
            status => {
                // Diagnostic payloads come through the same decompression
                // path as regular bodies.
                let mut reader = decode::body_reader(body, compression);
                let mut raw = Vec::new();
                reader.read_to_end(&mut raw)?;
                let body = decode::latin1_text(&raw);
                warn!(
                    target: "sourcer::service",
                    service = self.service.name(),
                    status = status.as_u16(),
                    "service returned HTTP error"
                );
                Err(SourceError::Protocol {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
