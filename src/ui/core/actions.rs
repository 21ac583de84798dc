/// Requests flowing from callbacks and key handlers back to the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Quit,

    // Navigation
    Navigate(String),
    OpenEntity {
        kind: String,
        entity_id: String,
        route: String,
        title: String,
    },

    // Entity operations
    CreateEntity {
        kind: String,
        name: String,
    },

    // Panels
    ToggleLogs,
    ClearRecent,
    ShowNotice(String),
}
