//! Command registry shared by every component that contributes commands.
//!
//! The registry is an explicitly constructed store: create one at startup
//! and hand clones of it to whoever needs to register or observe commands.
//! Clones share the same underlying state. Tests can create as many
//! isolated registries as they like.

use log::debug;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::command::Command;
use crate::observers::{ObserverList, Subscription};

#[derive(Default)]
struct RegistryState {
    /// Insertion-ordered; overwriting an id keeps its original slot
    commands: Vec<Command>,
}

fn lock(state: &Mutex<RegistryState>) -> MutexGuard<'_, RegistryState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Store of dynamically registered commands with subscribe/notify semantics.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    state: Arc<Mutex<RegistryState>>,
    listeners: ObserverList<[Command]>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the registered commands in insertion order
    pub fn commands(&self) -> Vec<Command> {
        lock(&self.state).commands.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).commands.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).commands.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        lock(&self.state).commands.iter().any(|c| c.id == id)
    }

    /// Insert or overwrite commands by id.
    ///
    /// Commands without an id are skipped. Subscribers are notified once if
    /// at least one command was stored.
    pub fn register<I>(&self, commands: I)
    where
        I: IntoIterator<Item = Command>,
    {
        let changed = {
            let mut state = lock(&self.state);
            let mut changed = false;
            for command in commands {
                if !command.has_id() {
                    debug!("Skipping command without id: {}", command.label);
                    continue;
                }
                match state.commands.iter_mut().find(|c| c.id == command.id) {
                    Some(slot) => *slot = command,
                    None => state.commands.push(command),
                }
                changed = true;
            }
            changed
        };

        if changed {
            self.notify();
        }
    }

    /// Remove commands by id. Subscribers are notified only if something was removed.
    pub fn unregister<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let changed = {
            let mut state = lock(&self.state);
            let mut changed = false;
            for id in ids {
                let id = id.as_ref();
                if let Some(index) = state.commands.iter().position(|c| c.id == id) {
                    state.commands.remove(index);
                    changed = true;
                }
            }
            changed
        };

        if changed {
            self.notify();
        }
    }

    /// Add a listener called with the full command list on every change.
    ///
    /// The listener stays attached until the returned [`Subscription`] is
    /// dropped or explicitly unsubscribed.
    #[must_use = "dropping the subscription detaches the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Command]) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self) {
        // Listeners get a copy taken outside the lock so they may call back into the registry
        let commands = self.commands();
        debug!("Command registry changed: {} command(s)", commands.len());
        self.listeners.notify(&commands);
    }
}

/// Commands owned by one component for as long as this guard lives.
///
/// Creating the guard registers the commands; dropping it unregisters the
/// same ids. [`RegisteredCommands::refresh`] swaps in commands whose actions
/// close over newer state without leaving stale entries behind.
pub struct RegisteredCommands {
    registry: CommandRegistry,
    ids: Vec<String>,
}

impl RegisteredCommands {
    pub fn new<I>(registry: &CommandRegistry, commands: I) -> Self
    where
        I: IntoIterator<Item = Command>,
    {
        let mut guard = Self {
            registry: registry.clone(),
            ids: Vec::new(),
        };
        guard.install(commands);
        guard
    }

    /// Re-register under fresh closures; previous ids are removed first
    pub fn refresh<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = Command>,
    {
        self.release();
        self.install(commands);
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    fn install<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = Command>,
    {
        let commands: Vec<Command> = commands.into_iter().collect();
        self.ids = commands.iter().map(|c| c.id.clone()).collect();
        self.registry.register(commands);
    }

    fn release(&mut self) {
        if !self.ids.is_empty() {
            let ids = std::mem::take(&mut self.ids);
            self.registry.unregister(&ids);
        }
    }
}

impl Drop for RegisteredCommands {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn command(id: &str, label: &str) -> Command {
        Command::new(id, label, || {})
    }

    #[test]
    fn test_overwrite_keeps_insertion_slot() {
        let registry = CommandRegistry::new();
        registry.register([command("a", "First"), command("b", "Second")]);
        registry.register([command("a", "First again")]);

        let commands = registry.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].id, "a");
        assert_eq!(commands[0].label, "First again");
        assert_eq!(commands[1].id, "b");
    }

    #[test]
    fn test_commands_without_id_are_skipped() {
        let registry = CommandRegistry::new();
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = notified.clone();
        let _sub = registry.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        registry.register([command("", "Broken")]);
        registry.register(Vec::new());

        assert!(registry.is_empty());
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_listener_may_reenter_registry() {
        let registry = CommandRegistry::new();
        let inner = registry.clone();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        let _sub = registry.subscribe(move |commands| {
            seen_clone.store(inner.len(), Ordering::SeqCst);
            assert_eq!(commands.len(), inner.len());
        });

        registry.register([command("a", "A"), command("b", "B")]);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_subscription_drop_detaches() {
        let registry = CommandRegistry::new();
        let sub = registry.subscribe(|_| {});
        assert_eq!(registry.listener_count(), 1);
        drop(sub);
        assert_eq!(registry.listener_count(), 0);
    }
}
