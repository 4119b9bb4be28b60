use crate::query::Query;
use crate::service::{ResponseSchema, SearchService, ServiceMetadata};

const DEFAULT_ENDPOINT: &str = "https://search.yahooapis.com/WebSearchService/V1/webSearch";

/// Application id sent when the caller does not supply one. Obtain a real
/// id for production deployments.
const DEFAULT_APP_ID: &str = "sourcer";

const SCHEMA: ResponseSchema = ResponseSchema {
    summary_element: "ResultSet",
    first_index_attr: "firstResultPosition",
    total_attr: "totalResultsAvailable",
    result_element: "Result",
};

/// Web-search service variant. One page holds at most 50 results and the
/// service never serves past the first 1000.
pub struct WebSearchSource {
    app_id: String,
    endpoint: String,
}

impl WebSearchSource {
    pub fn new(app_id: impl Into<String>) -> Self {
        WebSearchSource {
            app_id: app_id.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Points the source at a different endpoint, e.g. a self-hosted
    /// gateway or a test server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for WebSearchSource {
    fn default() -> Self {
        Self::new(DEFAULT_APP_ID)
    }
}

impl SearchService for WebSearchSource {
    fn name(&self) -> &'static str {
        "web"
    }

    fn service_uri(&self) -> &str {
        &self.endpoint
    }

    fn metadata(&self) -> ServiceMetadata {
        ServiceMetadata {
            results_per_page: 50,
            results_total_limit: 1000,
        }
    }

    fn schema(&self) -> &ResponseSchema {
        &SCHEMA
    }

    fn request_params(&self, query: &Query, first: u32, count: u32) -> Vec<(String, String)> {
        let mut params = vec![
            ("appid".to_string(), self.app_id.clone()),
            ("query".to_string(), query.text.clone()),
            ("type".to_string(), query.query_type.to_string()),
            ("results".to_string(), count.to_string()),
            ("start".to_string(), first.to_string()),
        ];
        if let Some(language) = &query.language {
            params.push(("language".to_string(), language.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryType;

    fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn builds_the_full_parameter_set() {
        let source = WebSearchSource::new("my-app");
        let query = Query::new("data clustering").with_type(QueryType::Phrase);
        let params = source.request_params(&query, 11, 50);

        assert_eq!(param(&params, "appid"), Some("my-app"));
        assert_eq!(param(&params, "query"), Some("data clustering"));
        assert_eq!(param(&params, "type"), Some("phrase"));
        assert_eq!(param(&params, "results"), Some("50"));
        assert_eq!(param(&params, "start"), Some("11"));
        assert_eq!(param(&params, "language"), None);
    }

    #[test]
    fn language_is_sent_only_when_set() {
        let source = WebSearchSource::default();
        let params = source.request_params(&Query::new("rust").with_language("de"), 1, 10);
        assert_eq!(param(&params, "language"), Some("de"));
    }
}
