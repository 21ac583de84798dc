//! Search box shown in the header; opens the overlay.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::trigger::Trigger;

pub struct TriggerWidget;

impl TriggerWidget {
    pub fn render(f: &mut Frame, area: Rect, trigger: &Trigger, open: bool) {
        let border = if open { Color::White } else { Color::DarkGray };
        let paragraph = Paragraph::new(format!("🔍 {}", trigger.placeholder()))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)));
        f.render_widget(paragraph, area);
    }
}
