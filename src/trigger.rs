//! Search box that opens the overlay.

use crate::constants::{TRIGGER_LABEL_MAC, TRIGGER_LABEL_OTHER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Other
        }
    }
}

/// Read-only search box; activating it toggles the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    platform: Platform,
}

impl Trigger {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn shortcut_label(&self) -> &'static str {
        match self.platform {
            Platform::Mac => TRIGGER_LABEL_MAC,
            Platform::Other => TRIGGER_LABEL_OTHER,
        }
    }

    pub fn placeholder(&self) -> String {
        format!("Search ({})", self.shortcut_label())
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}
