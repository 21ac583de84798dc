//! Command records shown in the overlay and held by the registry.

use std::fmt;
use std::sync::Arc;

/// Zero-argument callback invoked when a command is selected.
pub type CommandAction = Arc<dyn Fn() + Send + Sync>;

/// A registrable, invokable action with display metadata.
///
/// Commands are identified by `id`; registering a command whose id is
/// already present replaces the previous record. A command with an empty
/// id is treated as malformed and never registered.
#[derive(Clone)]
pub struct Command {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub shortcut: Option<String>,
    pub description: Option<String>,
    pub app: Option<String>,
    pub is_priority: bool,
    pub action: CommandAction,
}

impl Command {
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            icon: String::new(),
            shortcut: None,
            description: None,
            app: None,
            is_priority: false,
            action: Arc::new(action),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    pub fn priority(mut self) -> Self {
        self.is_priority = true;
        self
    }

    /// Run the bound action
    pub fn invoke(&self) {
        (self.action)();
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("shortcut", &self.shortcut)
            .field("description", &self.description)
            .field("app", &self.app)
            .field("is_priority", &self.is_priority)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_builder_and_invoke() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let command = Command::new("settings", "Open Settings", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .with_shortcut("⌘,")
        .with_app("Admin")
        .priority();

        assert!(command.has_id());
        assert!(command.is_priority);
        assert_eq!(command.shortcut.as_deref(), Some("⌘,"));

        command.invoke();
        command.clone().invoke();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_missing_id() {
        let command = Command::new("", "Nameless", || {});
        assert!(!command.has_id());
    }
}
