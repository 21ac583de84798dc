//! Overlay popup: input, filter chips, grouped rows and footer.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::constants::LOADING_INDICATOR;
use crate::overlay::{OverlayView, Row, Section};
use crate::ui::layout::LayoutManager;

pub struct OverlayWidget;

impl OverlayWidget {
    /// Render the overlay centered over `area`, highlighting visible row `highlighted`
    pub fn render(f: &mut Frame, area: Rect, view: &OverlayView, highlighted: usize) {
        let popup_area = LayoutManager::overlay_rect(area);
        f.render_widget(Clear, popup_area);

        let main_block = Block::default()
            .title(" OmniSearch ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(main_block, popup_area);

        let content_area = popup_area.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        let layout = Layout::vertical([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Chips
            Constraint::Min(0),    // Rows
            Constraint::Length(1), // Footer
        ])
        .split(content_area);

        Self::render_input(f, layout[0], view);
        Self::render_chips(f, layout[1], view);
        Self::render_rows(f, layout[2], view, highlighted);
        Self::render_footer(f, layout[3], view);
    }

    fn render_input(f: &mut Frame, area: Rect, view: &OverlayView) {
        let (text, style) = if view.query.is_empty() {
            (view.placeholder.to_string(), Style::default().fg(Color::DarkGray))
        } else {
            (view.query.clone(), Style::default().fg(Color::White))
        };

        let mut block = Block::default().borders(Borders::ALL).title("🔍");
        if view.loading {
            block = block.title_bottom(Line::from(LOADING_INDICATOR).right_aligned());
        }
        f.render_widget(Paragraph::new(text).style(style).block(block), area);

        let cursor = view.query.chars().count() as u16;
        f.set_cursor_position((area.x + 1 + cursor.min(area.width.saturating_sub(3)), area.y + 1));
    }

    fn render_chips(f: &mut Frame, area: Rect, view: &OverlayView) {
        let spans: Vec<Span> = view
            .chips
            .iter()
            .flat_map(|chip| {
                let style = match (view.chips_enabled, chip.active) {
                    (false, _) => Style::default().fg(Color::DarkGray),
                    (true, true) => Style::default().fg(Color::Black).bg(Color::Cyan),
                    (true, false) => Style::default().fg(Color::Gray),
                };
                [Span::styled(format!(" {} ", chip.label), style), Span::raw(" ")]
            })
            .collect();
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_rows(f: &mut Frame, area: Rect, view: &OverlayView, highlighted: usize) {
        if let Some(message) = view.empty_message() {
            f.render_widget(
                Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
                area,
            );
            return;
        }

        let mut items = Vec::new();
        let mut selected_line = None;
        let mut row_index = 0;
        for section in &view.sections {
            match section {
                Section::Separator => {
                    let rule = Line::from("─".repeat(area.width as usize));
                    items.push(ListItem::new(rule).style(Style::default().fg(Color::DarkGray)));
                }
                Section::Group(group) => {
                    items.push(ListItem::new(Line::from(Span::styled(
                        group.heading.clone(),
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
                    ))));
                    for row in &group.rows {
                        if row_index == highlighted {
                            selected_line = Some(items.len());
                        }
                        items.push(ListItem::new(Self::row_line(row)));
                        row_index += 1;
                    }
                }
            }
        }

        let list = List::new(items).highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
        let mut state = ListState::default().with_selected(selected_line);
        f.render_stateful_widget(list, area, &mut state);
    }

    fn row_line(row: &Row) -> Line<'static> {
        let mut spans = vec![
            Span::raw(format!(" {} ", row.icon)),
            Span::styled(row.label.clone(), Style::default().fg(Color::White)),
        ];
        if let Some(description) = &row.description {
            spans.push(Span::styled(format!("  {}", description), Style::default().fg(Color::Gray)));
        }
        if let Some(app) = &row.app {
            spans.push(Span::styled(format!("  [{}]", app), Style::default().fg(Color::DarkGray)));
        }
        if let Some(shortcut) = &row.shortcut {
            spans.push(Span::styled(format!("  {}", shortcut), Style::default().fg(Color::Cyan)));
        }
        Line::from(spans)
    }

    fn render_footer(f: &mut Frame, area: Rect, view: &OverlayView) {
        let spans: Vec<Span> = view
            .footer
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {} ", key), Style::default().fg(Color::Black).bg(Color::Gray)),
                    Span::styled(format!(" {}   ", label), Style::default().fg(Color::Gray)),
                ]
            })
            .collect();
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
