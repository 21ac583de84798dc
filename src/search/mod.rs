//! Debounced multi-category search behind the overlay.
//!
//! - [`category`] - host-supplied search domains and the fetch capability
//! - [`controller`] - the session state machine
//! - [`debounce`] - cancelable deferred callback
//! - [`fanout`] - order-preserving parallel fetches
//! - [`completion`] - tab completion over command labels
//! - [`session`] - session fields, filter scope and results

pub mod category;
pub mod completion;
pub mod controller;
pub mod debounce;
pub mod fanout;
pub mod session;

pub use category::{item_key, item_label, Category, EntityQuery, Item, Payload, SearchError, SearchResponse, SearchService};
pub use completion::resolve_completion;
pub use controller::{CommandSource, SearchController, SearchEvent, SearchOptions};
pub use debounce::Debouncer;
pub use fanout::{fetch_all, FetchRequest};
pub use session::{ActiveFilter, ResultGroup, SearchResults, SearchSession, SearchState};
