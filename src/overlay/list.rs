//! Highlight tracking over the visible rows.

use crate::search::SearchController;

use super::view::{OverlayView, Row};

/// Keyboard cursor of the overlay list.
///
/// The highlight is a position among the currently visible rows. Moving past
/// either end wraps around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayList {
    highlighted: usize,
}

impl OverlayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Back to the first row, as after a query edit
    pub fn reset(&mut self) {
        self.highlighted = 0;
    }

    pub fn highlighted_row<'a>(&self, view: &'a OverlayView) -> Option<&'a Row> {
        view.rows().get(self.highlighted).copied()
    }

    pub fn move_down(&mut self, view: &OverlayView) {
        let count = view.row_count();
        if count > 0 {
            self.highlighted = (self.clamped(count) + 1) % count;
        }
    }

    pub fn move_up(&mut self, view: &OverlayView) {
        let count = view.row_count();
        if count > 0 {
            self.highlighted = (self.clamped(count) + count - 1) % count;
        }
    }

    /// Pull the highlight back into range after the row set shrank
    pub fn clamp(&mut self, view: &OverlayView) {
        self.highlighted = self.clamped(view.row_count());
    }

    /// Report the highlighted row's value to the controller for tab completion
    pub fn sync_active_value(&self, view: &OverlayView, controller: &mut SearchController) {
        let value = self.highlighted_row(view).map(|row| row.value.clone()).unwrap_or_default();
        if controller.session().active_value != value {
            controller.set_active_value(value);
        }
    }

    fn clamped(&self, count: usize) -> usize {
        self.highlighted.min(count.saturating_sub(1))
    }
}
