//! Current location and recently opened entities.

use chrono::{Local, TimeZone};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::recent_activity::ActivityItem;

pub struct RecentPanel;

impl RecentPanel {
    pub fn render_location(f: &mut Frame, area: Rect, location: &str) {
        let paragraph = Paragraph::new(location.to_string())
            .style(Style::default().fg(Color::White))
            .block(Block::default().borders(Borders::ALL).title(" Location "));
        f.render_widget(paragraph, area);
    }

    pub fn render_recent(f: &mut Frame, area: Rect, items: &[ActivityItem]) {
        let rows: Vec<ListItem> = if items.is_empty() {
            vec![ListItem::new("Nothing opened yet").style(Style::default().fg(Color::DarkGray))]
        } else {
            items
                .iter()
                .map(|item| {
                    let when = Local
                        .timestamp_millis_opt(item.updated_at)
                        .single()
                        .map(|t| t.format("%H:%M:%S").to_string())
                        .unwrap_or_default();
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{} ", when), Style::default().fg(Color::DarkGray)),
                        Span::styled(format!("[{}] ", item.kind), Style::default().fg(Color::Cyan)),
                        Span::raw(item.title.clone()),
                        Span::styled(format!("  {}", item.route), Style::default().fg(Color::DarkGray)),
                    ]))
                })
                .collect()
        };

        let list = List::new(rows).block(Block::default().borders(Borders::ALL).title(" Recent "));
        f.render_widget(list, area);
    }

    pub fn render_logs(f: &mut Frame, area: Rect, logs: &[String]) {
        let rows: Vec<ListItem> = logs
            .iter()
            .take(area.height as usize)
            .map(|line| ListItem::new(line.clone()).style(Style::default().fg(Color::Gray)))
            .collect();
        let list = List::new(rows).block(Block::default().borders(Borders::ALL).title(" Logs "));
        f.render_widget(list, area);
    }
}
