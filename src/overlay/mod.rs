//! Presentation of the search session: grouped rows, filter chips and the
//! keyboard cursor, independent of any terminal or widget toolkit.

pub mod filter;
pub mod list;
pub mod view;

pub use filter::RowMatcher;
pub use list::OverlayList;
pub use view::{Chip, OverlayView, Row, RowGroup, RowTarget, Section};

use crate::search::{ActiveFilter, CommandSource, SearchController};

/// Hand a row selection back to the controller.
///
/// Returns false when the row no longer refers to anything, e.g. results
/// were replaced since the view was built.
pub fn activate(controller: &mut SearchController, target: &RowTarget) -> bool {
    match target {
        RowTarget::StaticCommand(index) => controller.select_command(CommandSource::Static, *index),
        RowTarget::SlashCommand(index) => controller.select_command(CommandSource::Slash, *index),
        RowTarget::Item { category_id, index } => controller.select_result(category_id, *index),
        RowTarget::Create { category_id } => controller.select_create(category_id),
    }
}

/// Apply a chip click. Chips are inert in command mode.
pub fn select_chip(controller: &mut SearchController, filter: ActiveFilter) -> bool {
    if controller.session().is_command_mode() {
        return false;
    }
    controller.set_active_filter(filter);
    true
}

/// Chip after the active one, wrapping to "All"
pub fn next_chip(view: &OverlayView) -> Option<ActiveFilter> {
    chip_at_offset(view, 1)
}

/// Chip before the active one, wrapping to the last category
pub fn previous_chip(view: &OverlayView) -> Option<ActiveFilter> {
    chip_at_offset(view, view.chips.len().saturating_sub(1))
}

fn chip_at_offset(view: &OverlayView, offset: usize) -> Option<ActiveFilter> {
    if view.chips.is_empty() {
        return None;
    }
    let active = view.chips.iter().position(|chip| chip.active).unwrap_or(0);
    view.chips
        .get((active + offset) % view.chips.len())
        .map(|chip| chip.filter.clone())
}
