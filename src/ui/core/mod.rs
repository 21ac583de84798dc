//! Building blocks shared by the terminal components.
//!
//! - [`actions`] - requests sent from callbacks and key handlers to the app
//! - [`component`] - the component trait every widget implements
//! - [`event_handler`] - terminal input and ticks for the event loop

pub mod actions;
pub mod component;
pub mod event_handler;

pub use actions::Action;
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
