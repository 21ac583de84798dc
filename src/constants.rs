//! Constants used throughout the crate
//!
//! This module centralizes UI text, sentinel values and defaults so the
//! controller, the presentation layer and the terminal host agree on them.

use std::time::Duration;

// Search defaults
/// Quiet period before a query edit triggers a fetch fan-out
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
/// Queries shorter than this never reach the categories
pub const MIN_QUERY_LEN: usize = 2;
/// The create affordance appears once the query is at least this long
pub const CREATE_MIN_LEN: usize = 3;
/// Prefix that switches the overlay into command mode
pub const COMMAND_PREFIX: char = '/';
/// Filter sentinel meaning "every category"
pub const FILTER_ALL: &str = "all";

// Default chords
pub const DEFAULT_OPEN_CHORD: &str = "ctrl+k";
pub const DEFAULT_COMMAND_CENTER_CHORD: &str = "ctrl+/";

// Group headings
pub const HEADING_SUGGESTIONS: &str = "Suggestions";
pub const HEADING_NAVIGATION: &str = "Navigation";
pub const HEADING_COMMAND_CENTER: &str = "Command Center  ⌘/";

// Overlay text
pub const CHIP_ALL: &str = "All";
pub const INPUT_PLACEHOLDER: &str = "Ask AI anything or search...";
pub const EMPTY_RESULTS: &str = "No results found.";
pub const LOADING_INDICATOR: &str = "Loading...";
pub const UNKNOWN_ITEM: &str = "Unknown Item";
pub const FOOTER_NAVIGATE: &str = "Navigate";
pub const FOOTER_SELECT: &str = "Select";
pub const FOOTER_CLOSE: &str = "Close";

// Trigger labels
pub const TRIGGER_LABEL_MAC: &str = "⌘K";
pub const TRIGGER_LABEL_OTHER: &str = "Ctrl+K";

// Recent activity
pub const DEFAULT_RECENT_STORAGE_KEY: &str = "recentActivity";
pub const RECENT_ACTIVITY_MAX_ITEMS: usize = 20;

// Log messages
pub const LOG_SEARCH_ERROR: &str = "❌ OmniSearch error";
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
