use serde::{Deserialize, Serialize};
use std::fmt;

/// Query words interpretation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// Returns results with all query terms.
    #[default]
    All,

    /// Returns results with one or more of the query terms.
    Any,

    /// Returns results containing the query terms as a phrase.
    Phrase,
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Transmitted as the lower-cased variant name.
        f.write_str(match self {
            QueryType::All => "all",
            QueryType::Any => "any",
            QueryType::Phrase => "phrase",
        })
    }
}

/// One search query. Immutable for the duration of a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub query_type: QueryType,
    /// Language code the results should be written in. Omitting it returns
    /// results in any language.
    pub language: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Query {
            text: text.into(),
            query_type: QueryType::default(),
            language: None,
        }
    }

    pub fn with_type(mut self, query_type: QueryType) -> Self {
        self.query_type = query_type;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_type_renders_lowercase() {
        assert_eq!(QueryType::All.to_string(), "all");
        assert_eq!(QueryType::Phrase.to_string(), "phrase");
        assert_eq!(
            serde_json::to_string(&QueryType::Any).unwrap(),
            r#""any""#
        );
    }

    #[test]
    fn builder_sets_optional_fields() {
        let query = Query::new("rust xml").with_type(QueryType::Phrase).with_language("en");
        assert_eq!(query.text, "rust xml");
        assert_eq!(query.query_type, QueryType::Phrase);
        assert_eq!(query.language.as_deref(), Some("en"));
    }
}
