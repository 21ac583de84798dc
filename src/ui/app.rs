//! Terminal host around the search overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{error, info};
use ratatui::{layout::Rect, Frame};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::logger::Logger;
use crate::observers::Subscription;
use crate::omnisearch::OmniSearch;
use crate::recent_activity::{ActivityItem, KeyValueStore, RecentActivity};
use crate::registry::{CommandRegistry, RegisteredCommands};
use crate::search::{SearchController, SearchOptions};
use crate::shortcuts::FocusTarget;
use crate::ui::components::{OverlayWidget, RecentPanel, StatusBar, TriggerWidget};
use crate::ui::core::{Action, Component, EventType};
use crate::ui::demo::{self, DemoContent};
use crate::ui::layout::LayoutManager;

/// Scope recorded with every activity entry
const ACTIVITY_SCOPE: &str = "demo";

pub struct App {
    search: OmniSearch,
    content: DemoContent,

    // Page state
    registry: CommandRegistry,
    page_commands: RegisteredCommands,
    location: String,
    notice: Option<String>,
    show_logs: bool,

    // Recent activity
    recent: RecentActivity,
    recent_key: String,
    recent_items: Vec<ActivityItem>,
    recent_dirty: Arc<AtomicBool>,
    _recent_subscription: Subscription,

    logger: Logger,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, logger: Logger, store: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let content = DemoContent::new();
        let registry = CommandRegistry::new();

        let controller = SearchController::new(SearchOptions::from(&config.search))
            .with_categories(content.categories(&action_tx))
            .with_static_commands(demo::static_commands(&action_tx))
            .with_slash_commands(demo::slash_commands(&action_tx))
            .with_registry(&registry);
        let search = OmniSearch::new(controller, &config.shortcuts)?;

        let location = "/dashboard".to_string();
        let page_commands = RegisteredCommands::new(&registry, demo::page_commands(&action_tx, &location));

        let recent = RecentActivity::new(store).with_max_items(config.recent_activity.max_items);
        let recent_key = config.recent_activity.storage_key.clone();
        let recent_dirty = Arc::new(AtomicBool::new(true));
        let dirty = recent_dirty.clone();
        let watched_key = recent_key.clone();
        let recent_subscription = recent.subscribe(move |key| {
            if key == watched_key {
                dirty.store(true, Ordering::SeqCst);
            }
        });

        let mut app = Self {
            search,
            content,
            registry,
            page_commands,
            location,
            notice: None,
            show_logs: config.logging.enabled,
            recent,
            recent_key,
            recent_items: Vec::new(),
            recent_dirty,
            _recent_subscription: recent_subscription,
            logger,
            action_tx,
            action_rx,
            should_quit: false,
        };
        app.reload_recent();
        Ok(app)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn search(&self) -> &OmniSearch {
        &self.search
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn recent_items(&self) -> &[ActivityItem] {
        &self.recent_items
    }

    /// Process an event through the host; returns true if a redraw is due
    pub fn handle_event(&mut self, event: EventType) -> bool {
        match event {
            EventType::Key(key) => {
                let action = self.handle_key_events(key);
                let action = self.update(action);
                self.handle_app_action(action);
                self.process_background_actions();
                true
            }
            EventType::Resize(_, _) => true,
            EventType::Tick => self.process_background_actions(),
            EventType::Other => false,
        }
    }

    /// Apply search completions and queued actions; returns true if anything changed
    pub fn process_background_actions(&mut self) -> bool {
        let mut changed = self.search.poll() > 0;

        while let Ok(action) = self.action_rx.try_recv() {
            self.handle_app_action(action);
            changed = true;
        }

        if self.recent_dirty.swap(false, Ordering::SeqCst) {
            self.reload_recent();
            changed = true;
        }
        changed
    }

    pub fn handle_app_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::Navigate(route) => self.navigate(route),
            Action::OpenEntity {
                kind,
                entity_id,
                route,
                title,
            } => {
                let item = ActivityItem::new(ACTIVITY_SCOPE, kind, entity_id, route.clone(), title);
                if let Err(e) = self.recent.add_item(&self.recent_key, item) {
                    error!("Failed to record recent activity: {}", e);
                }
                self.navigate(route);
            }
            Action::CreateEntity { kind, name } => match self.content.catalog(&kind) {
                Some(catalog) => {
                    catalog.insert(json!({"id": demo::next_id(catalog), "name": name}));
                    info!("Created {} '{}'", kind, name);
                    self.notice = Some(format!("Created {} \"{}\"", kind, name));
                }
                None => error!("No catalog for '{}'", kind),
            },
            Action::ToggleLogs => self.show_logs = !self.show_logs,
            Action::ClearRecent => {
                if let Err(e) = self.recent.clear(&self.recent_key) {
                    error!("Failed to clear recent activity: {}", e);
                }
                self.notice = Some("Recent activity cleared".to_string());
            }
            Action::ShowNotice(notice) => self.notice = Some(notice),
        }
    }

    fn navigate(&mut self, route: String) {
        info!("Navigate -> {}", route);
        self.location = route;
        self.notice = None;
        // Page commands close over the location; swap them for fresh ones
        self.page_commands
            .refresh(demo::page_commands(&self.action_tx, &self.location));
    }

    fn reload_recent(&mut self) {
        match self.recent.list(&self.recent_key) {
            Ok(items) => self.recent_items = items,
            Err(e) => error!("Failed to read recent activity: {}", e),
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('s') => {
                self.search.toggle();
                Action::None
            }
            KeyCode::Char('l') => Action::ToggleLogs,
            KeyCode::Char('c') => Action::ClearRecent,
            _ => Action::None,
        }
    }
}

impl Component for App {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        if self.search.handle_key(&key, FocusTarget::None) {
            return Action::None;
        }
        self.handle_global_key(key)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let main = LayoutManager::main_layout(rect);
        TriggerWidget::render(
            f,
            LayoutManager::trigger_rect(main[0]),
            self.search.trigger(),
            self.search.is_open(),
        );

        let (location_area, recent_area, logs_area) = LayoutManager::body_layout(main[1], self.show_logs);
        RecentPanel::render_location(f, location_area, &self.location);
        RecentPanel::render_recent(f, recent_area, &self.recent_items);
        if let Some(logs_area) = logs_area {
            RecentPanel::render_logs(f, logs_area, &self.logger.get_logs());
        }

        StatusBar::render(f, main[2], self.notice.as_deref(), self.search.trigger().shortcut_label());

        // Overlay on top if open
        if self.search.is_open() {
            let view = self.search.view();
            OverlayWidget::render(f, rect, &view, self.search.list().highlighted());
        }
    }
}
