//! What the overlay shows for a given controller state.

use crate::constants::{
    CHIP_ALL, EMPTY_RESULTS, FOOTER_CLOSE, FOOTER_NAVIGATE, FOOTER_SELECT, HEADING_COMMAND_CENTER, HEADING_NAVIGATION,
    HEADING_SUGGESTIONS, INPUT_PLACEHOLDER,
};
use crate::command::Command;
use crate::search::{item_label, ActiveFilter, SearchController};

use super::filter::RowMatcher;

/// What selecting a row does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowTarget {
    /// Index into the controller's static commands
    StaticCommand(usize),
    /// Index into the controller's effective slash commands
    SlashCommand(usize),
    Item { category_id: String, index: usize },
    Create { category_id: String },
}

/// One selectable line.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Text the list filters on and the value reported as highlighted
    pub value: String,
    pub label: String,
    pub icon: String,
    pub shortcut: Option<String>,
    pub description: Option<String>,
    pub app: Option<String>,
    pub target: RowTarget,
}

impl Row {
    fn static_command(index: usize, command: &Command) -> Self {
        Self {
            value: command.label.clone(),
            label: command.label.clone(),
            icon: command.icon.clone(),
            shortcut: command.shortcut.clone(),
            description: None,
            app: None,
            target: RowTarget::StaticCommand(index),
        }
    }

    fn slash_command(index: usize, command: &Command) -> Self {
        Self {
            value: format!("/ {} {}", command.label, command.description.as_deref().unwrap_or_default()),
            label: command.label.clone(),
            icon: command.icon.clone(),
            shortcut: Some("↵".to_string()),
            description: command.description.clone(),
            app: command.app.clone(),
            target: RowTarget::SlashCommand(index),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    pub heading: String,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Group(RowGroup),
    Separator,
}

/// Filter chip; exactly one is active.
#[derive(Debug, Clone, PartialEq)]
pub struct Chip {
    pub label: String,
    pub filter: ActiveFilter,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub query: String,
    pub placeholder: &'static str,
    pub loading: bool,
    pub chips: Vec<Chip>,
    /// False in command mode: chips are dimmed and ignore selection
    pub chips_enabled: bool,
    pub sections: Vec<Section>,
    pub footer: [(&'static str, &'static str); 3],
}

impl OverlayView {
    /// Lay out the overlay for the controller's current session.
    ///
    /// Rows whose value does not fuzzy-match the query are dropped, and so
    /// are groups left without rows.
    pub fn build(controller: &SearchController) -> Self {
        let session = controller.session();
        let query = session.query.as_str();
        let filter = session.active_filter.clone();
        let command_mode = session.is_command_mode();
        let short_query = session.query_len() < controller.options().min_query_len;

        let mut matcher = RowMatcher::new(query);
        let mut sections = Vec::new();

        if filter.is_all() && !command_mode {
            let rows = controller
                .static_commands()
                .iter()
                .enumerate()
                .filter(|(_, command)| !short_query || command.is_priority)
                .map(|(index, command)| Row::static_command(index, command))
                .collect();
            let heading = if short_query { HEADING_SUGGESTIONS } else { HEADING_NAVIGATION };
            push_group(&mut sections, &mut matcher, heading, rows);
        }

        if short_query && filter.is_all() && !command_mode {
            sections.push(Section::Separator);
        }

        if filter.is_all() {
            let rows = controller
                .slash_commands()
                .iter()
                .enumerate()
                .filter(|(_, command)| !query.is_empty() || command.is_priority)
                .map(|(index, command)| Row::slash_command(index, command))
                .collect();
            push_group(&mut sections, &mut matcher, HEADING_COMMAND_CENTER, rows);
        }

        if !command_mode {
            for group in controller.results().groups() {
                let Some(category) = controller.categories().iter().find(|c| c.id == group.category_id) else {
                    continue;
                };
                let rows = group
                    .items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let label = item_label(item).to_string();
                        Row {
                            value: label.clone(),
                            label,
                            icon: category.icon.clone(),
                            shortcut: None,
                            description: None,
                            app: None,
                            target: RowTarget::Item {
                                category_id: category.id.clone(),
                                index,
                            },
                        }
                    })
                    .collect();
                push_group(&mut sections, &mut matcher, &category.label, rows);
            }
        }

        for category in controller.create_candidates() {
            let label = format!("Create \"{}\"", query);
            let row = Row {
                value: label.clone(),
                label,
                icon: "→".to_string(),
                shortcut: None,
                description: None,
                app: None,
                target: RowTarget::Create {
                    category_id: category.id.clone(),
                },
            };
            push_group(&mut sections, &mut matcher, &category.label, vec![row]);
        }

        let chips = std::iter::once(Chip {
            label: CHIP_ALL.to_string(),
            filter: ActiveFilter::All,
            active: filter.is_all(),
        })
        .chain(controller.categories().iter().map(|category| Chip {
            label: category.label.clone(),
            filter: ActiveFilter::Category(category.id.clone()),
            active: filter.includes(&category.id) && !filter.is_all(),
        }))
        .collect();

        Self {
            query: query.to_string(),
            placeholder: INPUT_PLACEHOLDER,
            loading: session.loading,
            chips,
            chips_enabled: !command_mode,
            sections,
            footer: [("↑↓", FOOTER_NAVIGATE), ("↵", FOOTER_SELECT), ("esc", FOOTER_CLOSE)],
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = &RowGroup> {
        self.sections.iter().filter_map(|section| match section {
            Section::Group(group) => Some(group),
            Section::Separator => None,
        })
    }

    /// Visible rows in display order
    pub fn rows(&self) -> Vec<&Row> {
        self.groups().flat_map(|group| group.rows.iter()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.groups().map(|group| group.rows.len()).sum()
    }

    pub fn headings(&self) -> Vec<&str> {
        self.groups().map(|group| group.heading.as_str()).collect()
    }

    pub fn has_separator(&self) -> bool {
        self.sections.contains(&Section::Separator)
    }

    /// Message shown in place of the list when nothing is visible
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.row_count() == 0).then_some(EMPTY_RESULTS)
    }
}

/// Keep the rows matching the query; a group left empty is not shown
fn push_group(sections: &mut Vec<Section>, matcher: &mut RowMatcher, heading: &str, mut rows: Vec<Row>) {
    rows.retain(|row| matcher.is_match(&row.value));
    if !rows.is_empty() {
        sections.push(Section::Group(RowGroup {
            heading: heading.to_string(),
            rows,
        }));
    }
}
