use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

const KEYS: &[(&str, &str)] = &[
    ("j / k", "move cursor"),
    ("J / K", "reorder within lane"),
    ("a", "add status (pick a lane)"),
    ("r", "rename status"),
    ("c", "change color"),
    ("t", "cycle lane: todo → active → done → cancelled"),
    ("m", "pick up, then j/k + Enter to drop in a lane"),
    ("d", "delete (asks where tasks go)"),
    ("s", "save"),
    ("q", "quit"),
];

pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let width = 58u16.min(area.width);
    let height = (KEYS.len() as u16 + 2).min(area.height);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, rect);

    let mut lines = Vec::new();
    for (key, description) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<7}", key),
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(app.theme.background)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                description.to_string(),
                Style::default().fg(app.theme.text).bg(app.theme.background),
            ),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .style(Style::default().bg(app.theme.background))
        .title(" keys ");
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
