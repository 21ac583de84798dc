//! OmniSearch - a command palette and multi-category search overlay
//!
//! This library provides the control logic of a search overlay: a registry of
//! runtime-registered commands, global keyboard chords, a debounced search
//! session fanning out to host-supplied categories, and a presentation model
//! of what the overlay shows. A ratatui terminal host is included.
//!
//! # Modules
//!
//! * [`registry`] - Commands registered by components at runtime
//! * [`shortcuts`] - Chord matching and dispatch
//! * [`search`] - Search session state machine and fetch fan-out
//! * [`overlay`] - Grouped rows, filter chips and list navigation
//! * [`omnisearch`] - Host wiring chords, input and the overlay together
//! * [`recent_activity`] - Recently opened entities in a key-value store
//! * [`ui`] - Terminal rendering

/// In-memory search service for entity collections
pub mod catalog;

/// Command records
pub mod command;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Subscriber lists owned by stores
pub mod observers;

/// Search host: open flag, global chords and overlay input
pub mod omnisearch;

/// Presentation of the search session
pub mod overlay;

/// Recently opened entities
pub mod recent_activity;

/// Runtime command registry
pub mod registry;

/// Debounced multi-category search
pub mod search;

/// Keyboard chords and dispatch
pub mod shortcuts;

/// Search box that opens the overlay
pub mod trigger;

/// Terminal user interface components and rendering
pub mod ui;

pub use command::Command;
pub use omnisearch::OmniSearch;
pub use registry::{CommandRegistry, RegisteredCommands};
pub use search::{Category, SearchController};
