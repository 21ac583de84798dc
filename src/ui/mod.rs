//! Terminal host for the search overlay
//!
//! Renders the trigger, the current location and recent activity, and the
//! overlay itself with ratatui. All overlay decisions come from
//! [`crate::overlay::OverlayView`]; this module only draws them.

pub mod app;
pub mod components;
pub mod core;
pub mod demo;
pub mod layout;
pub mod renderer;

pub use app::App;
pub use layout::LayoutManager;
pub use renderer::run_app;
