use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata key for the first result's index, as declared by the service.
pub const FIRST_INDEX_KEY: &str = "firstIndex";

/// Metadata key for the number of results actually returned.
pub const RESULTS_RETURNED_KEY: &str = "resultsReturned";

/// Metadata key for the compression method the response body used.
pub const COMPRESSION_KEY: &str = "compression";

/// One result record. Fields are a pass-through of whatever the remote
/// schema provides, keyed by the element's local name.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }
}

/// A parsed service response. Created fresh per call and owned exclusively
/// by the caller after return.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Records in document order; the order reflects the provider's ranking.
    pub results: Vec<Record>,
    /// Total result count the service declared, when it declared one.
    pub results_total: Option<u64>,
    pub metadata: HashMap<String, String>,
}
