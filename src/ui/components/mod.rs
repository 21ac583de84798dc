pub mod overlay;
pub mod recent_panel;
pub mod status_bar;
pub mod trigger;

pub use overlay::OverlayWidget;
pub use recent_panel::RecentPanel;
pub use status_bar::StatusBar;
pub use trigger::TriggerWidget;
