//! Search categories and the fetch capability behind them.
//!
//! A [`Category`] is supplied by the host application: it names a search
//! domain, carries the base query parameters for it and decides what happens
//! when one of its items (or the create affordance) is selected. The
//! controller only ever reads categories.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::constants::UNKNOWN_ITEM;

/// Opaque search result item.
pub type Item = Value;

/// Base query parameters, merged with the search text per request.
pub type Payload = Map<String, Value>;

pub type SelectCallback = Arc<dyn Fn(&Item) + Send + Sync>;
pub type CreateCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Error types for category fetches
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search service error: {0}")]
    Service(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Shape of a service response.
///
/// Services answer either with a bare list or with a page object carrying
/// an `items` field. Anything else is kept as-is and normalizes to no items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    List(Vec<Item>),
    Page { items: Vec<Item> },
    Unrecognized(Value),
}

impl SearchResponse {
    /// Classify a raw JSON response
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items),
            Value::Object(mut object) => match object.remove("items") {
                Some(Value::Array(items)) => Self::Page { items },
                Some(other) => {
                    object.insert("items".to_string(), other);
                    Self::Unrecognized(Value::Object(object))
                }
                None => Self::Unrecognized(Value::Object(object)),
            },
            other => Self::Unrecognized(other),
        }
    }

    /// The single normalization applied at the fetch boundary
    pub fn into_items(self) -> Vec<Item> {
        match self {
            Self::List(items) | Self::Page { items } => items,
            Self::Unrecognized(_) => Vec::new(),
        }
    }
}

impl From<Value> for SearchResponse {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

/// Asynchronous fetch capability for one category.
///
/// Implementations must tolerate being called concurrently for distinct
/// categories.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Fetch items for a request payload that already contains
    /// `query.search` set to the debounced query text
    async fn fetch(&self, payload: &Payload) -> Result<SearchResponse, SearchError>;
}

/// A host-supplied search domain.
#[derive(Clone)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub service: Arc<dyn SearchService>,
    pub payload: Payload,
    pub on_select: SelectCallback,
    pub on_create: Option<CreateCallback>,
}

impl Category {
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, service: Arc<dyn SearchService>, on_select: F) -> Self
    where
        F: Fn(&Item) + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            icon: String::new(),
            service,
            payload: Payload::new(),
            on_select: Arc::new(on_select),
            on_create: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_on_create<F>(mut self, on_create: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_create = Some(Arc::new(on_create));
        self
    }

    pub fn can_create(&self) -> bool {
        self.on_create.is_some()
    }

    /// Base payload with `query` set to `{ "search": query }`
    pub fn request_payload(&self, query: &str) -> Payload {
        let mut payload = self.payload.clone();
        let mut search = Map::new();
        search.insert("search".to_string(), Value::String(query.to_string()));
        payload.insert("query".to_string(), Value::Object(search));
        payload
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Category")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("payload", &self.payload)
            .field("can_create", &self.can_create())
            .finish_non_exhaustive()
    }
}

/// Collection query with the defaults the entity adapters apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityQuery {
    pub queryselector: String,
    pub exclude_status: String,
    pub search: String,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

impl Default for EntityQuery {
    fn default() -> Self {
        Self {
            queryselector: "all".to_string(),
            exclude_status: "deleted".to_string(),
            search: String::new(),
            page: 1,
            page_size: 10,
        }
    }
}

impl EntityQuery {
    /// Read a request payload, falling back to defaults for anything missing
    pub fn from_payload(payload: &Payload) -> Self {
        let defaults = Self::default();
        let text = |key: &str, fallback: String| {
            payload
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(fallback)
        };
        let number = |key: &str, fallback: u32| {
            payload
                .get(key)
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(fallback)
        };

        Self {
            queryselector: text("queryselector", defaults.queryselector),
            exclude_status: text("exclude_status", defaults.exclude_status),
            search: payload
                .get("query")
                .and_then(|q| q.get("search"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            page: number("page", defaults.page),
            page_size: number("pageSize", defaults.page_size),
        }
    }
}

/// Display label of an item: `name`, `title` or `label`, whichever comes first
pub fn item_label(item: &Item) -> &str {
    ["name", "title", "label"]
        .iter()
        .find_map(|key| item.get(key).and_then(Value::as_str))
        .unwrap_or(UNKNOWN_ITEM)
}

/// Stable key of an item: `_id` or `id`
pub fn item_key(item: &Item) -> Option<String> {
    ["_id", "id"].iter().find_map(|key| match item.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_normalization() {
        assert_eq!(SearchResponse::from_json(json!([{"id": 1}])).into_items().len(), 1);
        assert_eq!(
            SearchResponse::from_json(json!({"items": [{"id": 1}, {"id": 2}], "total": 2}))
                .into_items()
                .len(),
            2
        );
        assert!(SearchResponse::from_json(json!({"items": "nope"})).into_items().is_empty());
        assert!(SearchResponse::from_json(json!({"data": []})).into_items().is_empty());
        assert!(SearchResponse::from_json(Value::Null).into_items().is_empty());
    }

    #[test]
    fn test_request_payload_merges_query() {
        let mut base = Payload::new();
        base.insert("pageSize".to_string(), json!(5));
        base.insert("query".to_string(), json!({"search": "old", "status": "x"}));
        let category = Category::new("courses", "Courses", Arc::new(NoopService), |_| {}).with_payload(base);

        let payload = category.request_payload("alg");
        assert_eq!(payload["pageSize"], json!(5));
        assert_eq!(payload["query"], json!({"search": "alg"}));
    }

    #[test]
    fn test_entity_query_defaults() {
        let category = Category::new("c", "C", Arc::new(NoopService), |_| {});
        let query = EntityQuery::from_payload(&category.request_payload("ab"));
        assert_eq!(query.queryselector, "all");
        assert_eq!(query.exclude_status, "deleted");
        assert_eq!(query.search, "ab");
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
    }

    #[test]
    fn test_item_label_and_key() {
        assert_eq!(item_label(&json!({"title": "T", "label": "L"})), "T");
        assert_eq!(item_label(&json!({"id": 3})), UNKNOWN_ITEM);
        assert_eq!(item_key(&json!({"_id": "abc", "id": 3})).as_deref(), Some("abc"));
        assert_eq!(item_key(&json!({"id": 3})).as_deref(), Some("3"));
        assert_eq!(item_key(&json!({})), None);
    }

    struct NoopService;

    #[async_trait]
    impl SearchService for NoopService {
        async fn fetch(&self, _payload: &Payload) -> Result<SearchResponse, SearchError> {
            Ok(SearchResponse::List(Vec::new()))
        }
    }
}
