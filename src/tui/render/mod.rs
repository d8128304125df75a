pub mod board_view;
pub mod help_overlay;
pub mod helpers;
pub mod popups;
pub mod status_row;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Mode};

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    board_view::render_board_view(frame, app, chunks[1]);

    // Popups render on top of the content area
    match app.mode {
        Mode::PickColor => popups::render_color_picker(frame, app, chunks[1]),
        Mode::PickCategory => popups::render_category_picker(frame, app, chunks[1]),
        Mode::Remap => popups::render_remap_popup(frame, app, chunks[1]),
        Mode::ConfirmQuit => popups::render_quit_popup(frame, app, chunks[1]),
        _ => {}
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(
        format!(" {} ", app.board.config.board.name),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    if app.session.is_dirty() {
        spans.push(Span::styled(
            "[unsaved]",
            Style::default().fg(app.theme.yellow).bg(bg),
        ));
    }
    let violations = app.session.violations();
    if !violations.is_empty() {
        spans.push(Span::styled(
            format!("  {} warning{}", violations.len(), if violations.len() == 1 { "" } else { "s" }),
            Style::default().fg(app.theme.red).bg(bg),
        ));
    }
    let header = Paragraph::new(vec![
        Line::from(spans),
        Line::from(Span::styled(
            "─".repeat(area.width as usize),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ]);
    frame.render_widget(header, area);
}
