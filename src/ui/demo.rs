//! Sample content for the terminal host: catalogs, categories and commands.
//!
//! Every callback only posts an [`Action`]; the app applies it on its own task.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use crate::catalog::Catalog;
use crate::command::Command;
use crate::search::{item_key, item_label, Category, Item};
use crate::ui::core::Action;

/// Catalogs by category id, in display order
pub struct DemoContent {
    pub catalogs: Vec<(String, Arc<Catalog>)>,
}

impl DemoContent {
    pub fn new() -> Self {
        let courses = Catalog::new(
            "courses",
            vec![
                json!({"id": 1, "name": "Algebra"}),
                json!({"id": 2, "name": "Linear Algebra"}),
                json!({"id": 3, "name": "Algorithms"}),
                json!({"id": 4, "name": "Biology"}),
                json!({"id": 5, "name": "Organic Chemistry"}),
                json!({"id": 6, "name": "Archived Astronomy", "status": "deleted"}),
            ],
        );
        let people = Catalog::new(
            "people",
            vec![
                json!({"_id": "ada", "name": "Ada Lovelace"}),
                json!({"_id": "alan", "name": "Alan Turing"}),
                json!({"_id": "grace", "name": "Grace Hopper"}),
                json!({"_id": "edsger", "name": "Edsger Dijkstra"}),
            ],
        );
        // Slower backend so out-of-order completion is visible
        let lessons = Catalog::new(
            "lessons",
            vec![
                json!({"id": "l1", "title": "Algebra: variables"}),
                json!({"id": "l2", "title": "Algorithms: sorting"}),
                json!({"id": "l3", "title": "Biology: the cell"}),
            ],
        )
        .with_latency(Duration::from_millis(600));

        Self {
            catalogs: vec![
                ("courses".to_string(), Arc::new(courses)),
                ("people".to_string(), Arc::new(people)),
                ("lessons".to_string(), Arc::new(lessons)),
            ],
        }
    }

    pub fn catalog(&self, id: &str) -> Option<&Arc<Catalog>> {
        self.catalogs.iter().find(|(catalog_id, _)| catalog_id == id).map(|(_, catalog)| catalog)
    }

    pub fn categories(&self, tx: &UnboundedSender<Action>) -> Vec<Category> {
        let meta: HashMap<&str, (&str, &str, bool)> = HashMap::from([
            ("courses", ("Courses", "📘", true)),
            ("people", ("People", "👤", false)),
            ("lessons", ("Lessons", "📝", true)),
        ]);

        self.catalogs
            .iter()
            .filter_map(|(id, catalog)| {
                let (label, icon, creatable) = meta.get(id.as_str()).copied()?;
                let kind = id.clone();
                let select_tx = tx.clone();
                let mut category = Category::new(id.clone(), label, catalog.clone(), move |item: &Item| {
                    let _ = select_tx.send(open_entity(&kind, item));
                })
                .with_icon(icon);

                if creatable {
                    let kind = id.clone();
                    let create_tx = tx.clone();
                    category = category.with_on_create(move |query: &str| {
                        let _ = create_tx.send(Action::CreateEntity {
                            kind: kind.clone(),
                            name: query.to_string(),
                        });
                    });
                }
                Some(category)
            })
            .collect()
    }
}

impl Default for DemoContent {
    fn default() -> Self {
        Self::new()
    }
}

fn open_entity(kind: &str, item: &Item) -> Action {
    let entity_id = item_key(item).unwrap_or_default();
    Action::OpenEntity {
        kind: kind.to_string(),
        route: format!("/{}/{}", kind, entity_id),
        entity_id,
        title: item_label(item).to_string(),
    }
}

fn navigate(tx: &UnboundedSender<Action>, route: &str) -> impl Fn() + Send + Sync + 'static {
    let tx = tx.clone();
    let route = route.to_string();
    move || {
        let _ = tx.send(Action::Navigate(route.clone()));
    }
}

fn send(tx: &UnboundedSender<Action>, action: Action) -> impl Fn() + Send + Sync + 'static {
    let tx = tx.clone();
    move || {
        let _ = tx.send(action.clone());
    }
}

/// Navigation entries for the "Suggestions"/"Navigation" group
pub fn static_commands(tx: &UnboundedSender<Action>) -> Vec<Command> {
    vec![
        Command::new("nav-dashboard", "Dashboard", navigate(tx, "/dashboard"))
            .with_icon("🏠")
            .with_shortcut("G D")
            .priority(),
        Command::new("nav-settings", "Open Settings", navigate(tx, "/settings"))
            .with_icon("⚙")
            .priority(),
        Command::new("nav-courses", "Courses", navigate(tx, "/courses")).with_icon("📘"),
        Command::new("nav-people", "People", navigate(tx, "/people")).with_icon("👤"),
        Command::new("nav-lessons", "Lessons", navigate(tx, "/lessons")).with_icon("📝"),
    ]
}

/// Command Center entries
pub fn slash_commands(tx: &UnboundedSender<Action>) -> Vec<Command> {
    vec![
        Command::new(
            "create-project",
            "Create Project",
            send(tx, Action::ShowNotice("New project started".to_string())),
        )
        .with_icon("✚")
        .with_description("Start something new")
        .with_app("Projects")
        .priority(),
        Command::new("clear-recent", "Clear Recent", send(tx, Action::ClearRecent))
            .with_icon("🧹")
            .with_description("Forget recently opened items")
            .priority(),
        Command::new("toggle-logs", "Toggle Logs", send(tx, Action::ToggleLogs))
            .with_icon("📜")
            .with_description("Show or hide the log panel"),
        Command::new("quit", "Quit", send(tx, Action::Quit)).with_icon("⏻"),
    ]
}

/// Commands the current page contributes through the registry
pub fn page_commands(tx: &UnboundedSender<Action>, location: &str) -> Vec<Command> {
    let mut commands = vec![Command::new(
        "page-copy-link",
        "Copy Link",
        send(tx, Action::ShowNotice(format!("Copied link to {}", location))),
    )
    .with_icon("🔗")
    .with_description(location)
    .with_app("Page")];

    if location != "/dashboard" {
        commands.push(
            Command::new("page-back-home", "Back to Dashboard", navigate(tx, "/dashboard"))
                .with_icon("↩")
                .with_app("Page"),
        );
    }
    commands
}

/// Id for an entry created from the overlay
pub fn next_id(catalog: &Catalog) -> Value {
    json!(format!("new-{}", catalog.len() + 1))
}
