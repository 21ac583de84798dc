//! State of one open-overlay interaction.

use std::fmt;

use super::category::Item;
use crate::constants::{COMMAND_PREFIX, FILTER_ALL};

/// Category scope of a search: every category or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveFilter {
    #[default]
    All,
    Category(String),
}

impl ActiveFilter {
    /// `"all"` maps to [`ActiveFilter::All`], anything else names a category
    pub fn from_id(id: &str) -> Self {
        if id == FILTER_ALL {
            Self::All
        } else {
            Self::Category(id.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn includes(&self, category_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => id == category_id,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => FILTER_ALL,
            Self::Category(id) => id,
        }
    }
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetched items of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultGroup {
    pub category_id: String,
    pub items: Vec<Item>,
}

/// Results keyed by category id, in category declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    groups: Vec<ResultGroup>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group; empty groups are omitted
    pub fn push(&mut self, category_id: impl Into<String>, items: Vec<Item>) {
        if !items.is_empty() {
            self.groups.push(ResultGroup {
                category_id: category_id.into(),
                items,
            });
        }
    }

    pub fn get(&self, category_id: &str) -> Option<&[Item]> {
        self.groups
            .iter()
            .find(|group| group.category_id == category_id)
            .map(|group| group.items.as_slice())
    }

    pub fn groups(&self) -> &[ResultGroup] {
        &self.groups
    }

    pub fn category_ids(&self) -> Vec<&str> {
        self.groups.iter().map(|group| group.category_id.as_str()).collect()
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

/// Controller-owned session fields.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    /// Raw input text; a leading `/` selects command mode
    pub query: String,
    /// Query text as of the last elapsed debounce
    pub debounced_query: String,
    pub active_filter: ActiveFilter,
    pub loading: bool,
    pub results: SearchResults,
    /// Value of the highlighted row, used by tab completion
    pub active_value: String,
}

impl SearchSession {
    pub fn is_command_mode(&self) -> bool {
        is_command_query(&self.query)
    }

    pub fn query_len(&self) -> usize {
        self.query.chars().count()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn is_command_query(query: &str) -> bool {
    query.starts_with(COMMAND_PREFIX)
}

/// Observable phase of the search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Overlay not open
    Closed,
    /// Open with an empty query
    Idle,
    /// Query changed, waiting for input to settle
    Debouncing,
    /// Fan-out in flight
    Fetching,
    IdleWithResults,
    IdleEmpty,
}
