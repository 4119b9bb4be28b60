// src/lib.rs
pub mod error;
pub mod query;
pub mod response;
pub mod service;
pub mod sources;
pub mod transport;

use std::collections::HashMap;
use std::sync::Arc;

pub use error::SourceError;
pub use query::{Query, QueryType};
pub use response::{
    Record, SearchResponse, COMPRESSION_KEY, FIRST_INDEX_KEY, RESULTS_RETURNED_KEY,
};
pub use service::{ResponseSchema, SearchClient, SearchService, ServiceMetadata};
pub use transport::HttpConfig;

/// Registry of named source strategies. Strategies are shared, immutable
/// and handed out by clone of the `Arc`.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn SearchService>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        SourceRegistry {
            sources: HashMap::new(),
        }
    }

    pub fn register(&mut self, source: Arc<dyn SearchService>) {
        self.sources.insert(source.name().to_string(), source);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SearchService>> {
        self.sources.get(name).cloned()
    }

    pub fn list(&self) -> Vec<SourceInfo> {
        let mut infos: Vec<_> = self
            .sources
            .values()
            .map(|source| SourceInfo {
                name: source.name().to_string(),
                service_uri: source.service_uri().to_string(),
                results_per_page: source.metadata().results_per_page,
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SourceInfo {
    pub name: String,
    pub service_uri: String,
    pub results_per_page: u32,
}

/// Builds a registry with every built-in source registered. Downstream
/// apps get a ready-to-use registry without wiring each source by hand.
pub fn build_registry() -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    registry.register(Arc::new(sources::web::WebSearchSource::default()));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_finds_builtin_sources_by_name() {
        let registry = build_registry();
        assert!(registry.get("web").is_some());
        assert!(registry.get("nope").is_none());

        let infos = registry.list();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].name, "web");
        assert_eq!(infos[0].results_per_page, 50);
    }
}
