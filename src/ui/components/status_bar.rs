//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar: the last notice, or the key help
    pub fn render(f: &mut Frame, area: Rect, notice: Option<&str>, trigger_label: &str) {
        let (status_text, status_color) = match notice {
            Some(notice) => (notice.to_string(), Color::Yellow),
            None => (
                format!("{}: search • Ctrl+/: commands • s: search box • l: logs • c: clear recent • q: quit", trigger_label),
                Color::Gray,
            ),
        };

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }
}
