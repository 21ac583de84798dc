//! Search session state machine.
//!
//! The controller owns the query, the debounce timer and the per-category
//! fetch fan-out. Timers and fetches run as Tokio tasks and report back over
//! an unbounded channel as [`SearchEvent`]s; the host feeds those events back
//! through [`SearchController::handle_event`] (or [`SearchController::poll_events`]
//! from a render loop), so session state is only ever mutated from the
//! owner's task.
//!
//! Every edit bumps an edit generation and every fan-out a fetch generation.
//! Events carrying an older generation than the current one are stale and
//! dropped, which is how late responses for abandoned queries are kept out of
//! the session.

use log::{debug, info, warn};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use super::category::{Category, Item};
use super::completion::resolve_completion;
use super::debounce::Debouncer;
use super::fanout::{fetch_all, FetchRequest};
use super::session::{is_command_query, ActiveFilter, SearchResults, SearchSession, SearchState};
use crate::command::Command;
use crate::config::SearchConfig;
use crate::constants::{CREATE_MIN_LEN, DEFAULT_DEBOUNCE, MIN_QUERY_LEN};
use crate::observers::Subscription;
use crate::registry::CommandRegistry;

/// Completion notices delivered back to the controller.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    DebounceElapsed { generation: u64 },
    FetchSettled { generation: u64, results: SearchResults },
}

/// Tunables for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub debounce: Duration,
    pub min_query_len: usize,
    pub create_min_len: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_query_len: MIN_QUERY_LEN,
            create_min_len: CREATE_MIN_LEN,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            min_query_len: config.min_query_len,
            create_min_len: config.create_min_len,
        }
    }
}

/// Which command list a command selection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Static,
    Slash,
}

pub struct SearchController {
    options: SearchOptions,
    categories: Vec<Category>,
    static_commands: Vec<Command>,
    slash_commands: Vec<Command>,
    registry_commands: Arc<Mutex<Vec<Command>>>,
    registry_subscription: Option<Subscription>,
    session: SearchSession,
    open: bool,
    debouncer: Debouncer,
    edit_generation: u64,
    fetch_generation: u64,
    event_tx: mpsc::UnboundedSender<SearchEvent>,
    event_rx: mpsc::UnboundedReceiver<SearchEvent>,
}

impl SearchController {
    pub fn new(options: SearchOptions) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            options,
            categories: Vec::new(),
            static_commands: Vec::new(),
            slash_commands: Vec::new(),
            registry_commands: Arc::new(Mutex::new(Vec::new())),
            registry_subscription: None,
            session: SearchSession::default(),
            open: false,
            debouncer: Debouncer::new(options.debounce),
            edit_generation: 0,
            fetch_generation: 0,
            event_tx,
            event_rx,
        }
    }

    /// Track the registry's commands as extra slash commands
    pub fn with_registry(mut self, registry: &CommandRegistry) -> Self {
        self.attach_registry(registry);
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_static_commands(mut self, commands: Vec<Command>) -> Self {
        self.static_commands = commands;
        self
    }

    pub fn with_slash_commands(mut self, commands: Vec<Command>) -> Self {
        self.slash_commands = commands;
        self
    }

    pub fn attach_registry(&mut self, registry: &CommandRegistry) {
        let snapshot = self.registry_commands.clone();
        set_snapshot(&snapshot, registry.commands());
        self.registry_subscription = Some(registry.subscribe(move |commands| {
            set_snapshot(&snapshot, commands.to_vec());
        }));
    }

    /// Stop tracking the registry and forget its commands
    pub fn detach_registry(&mut self) {
        self.registry_subscription = None;
        set_snapshot(&self.registry_commands, Vec::new());
    }

    pub fn has_registry(&self) -> bool {
        self.registry_subscription.is_some()
    }

    /// Replace the categories; a filter naming a removed category falls back to all
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        if !self.is_known_filter(&self.session.active_filter) {
            self.session.active_filter = ActiveFilter::All;
        }
    }

    pub fn set_static_commands(&mut self, commands: Vec<Command>) {
        self.static_commands = commands;
    }

    pub fn set_slash_commands(&mut self, commands: Vec<Command>) {
        self.slash_commands = commands;
    }

    // --- Observable state -------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn query(&self) -> &str {
        &self.session.query
    }

    pub fn results(&self) -> &SearchResults {
        &self.session.results
    }

    pub fn active_filter(&self) -> &ActiveFilter {
        &self.session.active_filter
    }

    pub fn is_loading(&self) -> bool {
        self.session.loading
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn static_commands(&self) -> &[Command] {
        &self.static_commands
    }

    /// Caller-supplied slash commands followed by registered ones
    pub fn slash_commands(&self) -> Vec<Command> {
        let registered = self
            .registry_commands
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default();
        self.slash_commands.iter().cloned().chain(registered).collect()
    }

    pub fn state(&self) -> SearchState {
        if !self.open {
            SearchState::Closed
        } else if self.debouncer.is_pending() {
            SearchState::Debouncing
        } else if self.session.loading {
            SearchState::Fetching
        } else if !self.session.results.is_empty() {
            SearchState::IdleWithResults
        } else if self.session.query.is_empty() {
            SearchState::Idle
        } else {
            SearchState::IdleEmpty
        }
    }

    /// Categories the current filter searches
    pub fn categories_in_scope(&self) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|category| self.session.active_filter.includes(&category.id))
            .collect()
    }

    /// Categories offering the create affordance for the current query
    pub fn create_candidates(&self) -> Vec<&Category> {
        if self.session.is_command_mode() || self.session.query_len() < self.options.create_min_len {
            return Vec::new();
        }
        self.categories_in_scope()
            .into_iter()
            .filter(|category| category.can_create())
            .collect()
    }

    // --- Overlay control --------------------------------------------------

    pub fn open(&mut self) {
        if !self.open {
            debug!("OmniSearch opened");
            self.open = true;
        }
    }

    /// Close the overlay and reset the session. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.open {
            debug!("OmniSearch closed");
        }
        self.open = false;
        self.debouncer.cancel_pending();
        self.edit_generation += 1;
        self.fetch_generation += 1;
        self.session.reset();
    }

    /// Replace the query text and restart the debounce timer.
    ///
    /// Ignored while the overlay is closed.
    pub fn set_query(&mut self, text: impl Into<String>) {
        if !self.open {
            debug!("Ignoring query edit while closed");
            return;
        }
        self.session.query = text.into();
        self.edit_generation += 1;

        // A query that will not be searched cannot show results, not even late ones
        if self.suppresses_fetch(&self.session.query) {
            self.fetch_generation += 1;
            self.session.results.clear();
            self.session.loading = false;
        }

        let generation = self.edit_generation;
        let tx = self.event_tx.clone();
        self.debouncer.schedule(move || {
            let _ = tx.send(SearchEvent::DebounceElapsed { generation });
        });
    }

    /// Change the category scope and search the settled query again.
    ///
    /// Filters naming a category that does not exist are ignored.
    pub fn set_active_filter(&mut self, filter: ActiveFilter) {
        if self.session.active_filter == filter {
            return;
        }
        if !self.is_known_filter(&filter) {
            warn!("Ignoring filter for unknown category '{}'", filter);
            return;
        }
        debug!("OmniSearch filter -> {}", filter);
        self.session.active_filter = filter;
        if self.open {
            self.run_search();
        }
    }

    pub fn set_active_value(&mut self, value: impl Into<String>) {
        self.session.active_value = value.into();
    }

    /// Apply tab completion; returns true if the query changed
    pub fn complete(&mut self) -> bool {
        let slash = self.slash_commands();
        let completion = resolve_completion(
            &self.session.query,
            &self.session.active_value,
            &self.static_commands,
            &slash,
        );

        match completion {
            Some(label) if label != self.session.query => {
                self.set_query(label);
                true
            }
            _ => false,
        }
    }

    // --- Selection --------------------------------------------------------

    /// Close, then hand the item to its category. Returns false if the item is gone.
    pub fn select_result(&mut self, category_id: &str, index: usize) -> bool {
        let selected = self.categories.iter().find(|c| c.id == category_id).and_then(|category| {
            self.session
                .results
                .get(category_id)
                .and_then(|items| items.get(index))
                .map(|item| (category.on_select.clone(), item.clone()))
        });

        match selected {
            Some((on_select, item)) => {
                self.close();
                on_select(&item);
                true
            }
            None => false,
        }
    }

    /// Close, then hand an arbitrary item to the named category
    pub fn select_item(&mut self, category_id: &str, item: &Item) -> bool {
        match self.categories.iter().find(|c| c.id == category_id) {
            Some(category) => {
                let on_select = category.on_select.clone();
                self.close();
                on_select(item);
                true
            }
            None => false,
        }
    }

    /// Close, then run the command's action
    pub fn select_command(&mut self, source: CommandSource, index: usize) -> bool {
        let command = match source {
            CommandSource::Static => self.static_commands.get(index).cloned(),
            CommandSource::Slash => self.slash_commands().get(index).cloned(),
        };

        match command {
            Some(command) => {
                info!("Running command '{}'", command.id);
                self.close();
                command.invoke();
                true
            }
            None => false,
        }
    }

    /// Close, then ask the category to create something named after the raw query
    pub fn select_create(&mut self, category_id: &str) -> bool {
        let on_create = self
            .create_candidates()
            .into_iter()
            .find(|category| category.id == category_id)
            .and_then(|category| category.on_create.clone());

        match on_create {
            Some(on_create) => {
                let query = self.session.query.clone();
                self.close();
                on_create(&query);
                true
            }
            None => false,
        }
    }

    // --- Event plumbing ---------------------------------------------------

    /// Wait for the next timer or fetch completion
    pub async fn next_event(&mut self) -> Option<SearchEvent> {
        self.event_rx.recv().await
    }

    /// Wait for and apply the next event
    pub async fn process_next(&mut self) {
        if let Some(event) = self.next_event().await {
            self.handle_event(event);
        }
    }

    /// Apply every event that is already queued; returns how many were applied
    pub fn poll_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    pub fn handle_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::DebounceElapsed { generation } => {
                if !self.open || generation != self.edit_generation {
                    debug!("Dropping stale debounce (generation {})", generation);
                    return;
                }
                self.session.debounced_query = self.session.query.clone();
                self.run_search();
            }
            SearchEvent::FetchSettled { generation, results } => {
                if !self.open
                    || generation != self.fetch_generation
                    || self.suppresses_fetch(&self.session.query)
                {
                    debug!("Discarding stale search results (generation {})", generation);
                    return;
                }
                debug!(
                    "Search settled: {} item(s) in {} categor(ies)",
                    results.item_count(),
                    results.groups().len()
                );
                self.session.results = results;
                self.session.loading = false;
            }
        }
    }

    fn is_known_filter(&self, filter: &ActiveFilter) -> bool {
        match filter {
            ActiveFilter::All => true,
            ActiveFilter::Category(id) => self.categories.iter().any(|category| &category.id == id),
        }
    }

    /// Command-mode and short queries never reach the categories
    fn suppresses_fetch(&self, query: &str) -> bool {
        is_command_query(query) || query.chars().count() < self.options.min_query_len
    }

    /// Search the debounced query against the categories in scope
    fn run_search(&mut self) {
        // Any fan-out still in flight is superseded from here on
        self.fetch_generation += 1;

        let query = self.session.debounced_query.clone();
        if self.suppresses_fetch(&query) {
            self.session.results.clear();
            self.session.loading = false;
            return;
        }

        let requests: Vec<FetchRequest> = self
            .categories_in_scope()
            .into_iter()
            .map(|category| FetchRequest::for_category(category, &query))
            .collect();

        debug!("Searching '{}' across {} categor(ies)", query, requests.len());
        self.session.loading = true;

        let generation = self.fetch_generation;
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let results = fetch_all(requests).await;
            let _ = tx.send(SearchEvent::FetchSettled { generation, results });
        });
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}

fn set_snapshot(snapshot: &Mutex<Vec<Command>>, commands: Vec<Command>) {
    if let Ok(mut current) = snapshot.lock() {
        *current = commands;
    }
}
