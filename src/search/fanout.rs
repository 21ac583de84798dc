//! Parallel per-category fetches.

use futures::future::join_all;
use log::{debug, error};
use std::sync::Arc;

use super::category::{Category, Payload, SearchService};
use super::session::SearchResults;
use crate::constants::LOG_SEARCH_ERROR;

/// One category's share of a fan-out.
#[derive(Clone)]
pub struct FetchRequest {
    pub category_id: String,
    pub service: Arc<dyn SearchService>,
    pub payload: Payload,
}

impl FetchRequest {
    pub fn for_category(category: &Category, query: &str) -> Self {
        Self {
            category_id: category.id.clone(),
            service: category.service.clone(),
            payload: category.request_payload(query),
        }
    }
}

/// Run every request concurrently and assemble the results.
///
/// Groups come out in request order regardless of which service answers
/// first. A failing service is logged and contributes nothing; its siblings
/// are unaffected.
pub async fn fetch_all(requests: Vec<FetchRequest>) -> SearchResults {
    let responses = join_all(
        requests
            .iter()
            .map(|request| async move { request.service.fetch(&request.payload).await }),
    )
    .await;

    let mut results = SearchResults::new();
    for (request, response) in requests.iter().zip(responses) {
        match response {
            Ok(response) => {
                let items = response.into_items();
                debug!("Category '{}' returned {} item(s)", request.category_id, items.len());
                results.push(request.category_id.clone(), items);
            }
            Err(e) => {
                error!("{} in category '{}': {}", LOG_SEARCH_ERROR, request.category_id, e);
            }
        }
    }
    results
}
