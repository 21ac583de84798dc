//! Layout management and calculations

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Manages layout calculations and constraints for the UI
pub struct LayoutManager;

impl LayoutManager {
    /// Main areas: header (search box), body, status bar
    #[must_use]
    pub fn main_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(area)
            .to_vec()
    }

    /// Body areas: location and recent list on the left, logs on the right when shown
    #[must_use]
    pub fn body_layout(area: Rect, show_logs: bool) -> (Rect, Rect, Option<Rect>) {
        let columns = if show_logs {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area)
                .to_vec()
        } else {
            vec![area]
        };

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(columns[0]);

        (left[0], left[1], columns.get(1).copied())
    }

    /// Header search box, capped in width
    #[must_use]
    pub fn trigger_rect(area: Rect) -> Rect {
        let width = area.width.min(48);
        Rect::new(area.x + area.width.saturating_sub(width) / 2, area.y, width, area.height)
    }

    /// Overlay popup: near the top, at most 90 columns wide
    #[must_use]
    pub fn overlay_rect(area: Rect) -> Rect {
        let width = area.width.saturating_sub(4).min(90);
        let height = area.height.saturating_sub(4).min(24);
        Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 4,
            width,
            height,
        )
    }
}
