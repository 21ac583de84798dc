#![allow(dead_code)]

use async_trait::async_trait;
use omnisearch::search::{Category, Item, Payload, SearchError, SearchResponse, SearchService};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Service answering every request with a fixed JSON response, recording queries
pub struct MockService {
    response: Value,
    delay: Duration,
    fail: bool,
    queries: Mutex<Vec<String>>,
}

impl MockService {
    pub fn new(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response,
            delay: Duration::ZERO,
            fail: false,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn delayed(response: Value, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            response,
            delay,
            fail: false,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: Value::Null,
            delay: Duration::ZERO,
            fail: true,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchService for MockService {
    async fn fetch(&self, payload: &Payload) -> Result<SearchResponse, SearchError> {
        let search = payload
            .get("query")
            .and_then(|q| q.get("search"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.queries.lock().unwrap().push(search);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(SearchError::Network("connection refused".to_string()));
        }
        Ok(SearchResponse::from_json(self.response.clone()))
    }
}

/// Items handed to a category's select callback
pub type Selected = Arc<Mutex<Vec<Item>>>;

pub fn category(id: &str, service: Arc<MockService>) -> (Category, Selected) {
    let selected: Selected = Arc::new(Mutex::new(Vec::new()));
    let sink = selected.clone();
    let category = Category::new(id, id.to_uppercase(), service, move |item: &Item| {
        sink.lock().unwrap().push(item.clone());
    });
    (category, selected)
}
