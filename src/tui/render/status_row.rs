use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen): one-shot messages on the left,
/// mode key hints on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (message, message_style) = match &app.status_message {
        Some(msg) => (msg.clone(), Style::default().fg(app.theme.red).bg(bg)),
        None => (String::new(), Style::default().fg(app.theme.dim).bg(bg)),
    };

    let hint = match app.mode {
        Mode::Navigate => "a add  r rename  c color  t cycle  m move  d delete  s save  ? help",
        Mode::EditName => "Enter apply  Esc cancel",
        Mode::PickColor | Mode::PickCategory => "j/k choose  Enter apply  Esc cancel",
        Mode::Drag => "j/k lane  Enter drop  c color  Esc put back",
        Mode::Remap => "j/k choose  Enter remap  Esc keep status",
        Mode::ConfirmQuit => "y discard  s save  n back",
    };

    let mut spans = vec![Span::styled(message, message_style)];
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
