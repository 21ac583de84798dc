//! In-memory entity collection answering category searches.
//!
//! Applies the entity-adapter query shape ([`EntityQuery`]): items whose
//! `status` equals `exclude_status` are skipped, the search text is matched
//! case-insensitively against the display label, and results are paged.

use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;

use crate::search::{item_label, EntityQuery, Item, Payload, SearchError, SearchResponse, SearchService};

#[derive(Debug, Default)]
pub struct Catalog {
    name: String,
    items: RwLock<Vec<Item>>,
    latency: Option<Duration>,
}

impl Catalog {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            items: RwLock::new(items),
            latency: None,
        }
    }

    /// Simulated round-trip time per fetch
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&self, item: Item) {
        if let Ok(mut items) = self.items.write() {
            items.push(item);
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items matching the query, one page of them
    pub fn search(&self, query: &EntityQuery) -> Result<Vec<Item>, SearchError> {
        let items = self
            .items
            .read()
            .map_err(|_| SearchError::Service(format!("{} catalog is unavailable", self.name)))?;

        let needle = query.search.to_lowercase();
        let page = query.page.max(1) as usize;
        let page_size = query.page_size as usize;

        Ok(items
            .iter()
            .filter(|item| item.get("status").and_then(Value::as_str) != Some(query.exclude_status.as_str()))
            .filter(|item| needle.is_empty() || item_label(item).to_lowercase().contains(&needle))
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SearchService for Catalog {
    async fn fetch(&self, payload: &Payload) -> Result<SearchResponse, SearchError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let query = EntityQuery::from_payload(payload);
        let items = self.search(&query)?;
        debug!("{} catalog: '{}' -> {} item(s)", self.name, query.search, items.len());
        Ok(SearchResponse::Page { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::new(
            "courses",
            vec![
                json!({"id": 1, "name": "Algebra"}),
                json!({"id": 2, "name": "Algorithms", "status": "deleted"}),
                json!({"id": 3, "name": "Biology"}),
                json!({"id": 4, "title": "Linear Algebra"}),
            ],
        )
    }

    #[test]
    fn test_search_skips_excluded_status() {
        let query = EntityQuery {
            search: "alg".to_string(),
            ..EntityQuery::default()
        };
        let ids: Vec<i64> = catalog()
            .search(&query)
            .unwrap()
            .iter()
            .filter_map(|item| item["id"].as_i64())
            .collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_search_pages() {
        let query = EntityQuery {
            page: 2,
            page_size: 2,
            ..EntityQuery::default()
        };
        let items = catalog().search(&query).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], 4);
    }

    #[tokio::test]
    async fn test_fetch_reads_request_payload() {
        let mut payload = Payload::new();
        payload.insert("query".to_string(), json!({"search": "bio"}));
        let response = catalog().fetch(&payload).await.unwrap();
        assert_eq!(response.into_items(), vec![json!({"id": 3, "name": "Biology"})]);
    }
}
