use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::status::Category;
use crate::tui::app::{App, Mode};

use super::helpers::{category_symbol, swatch_color, truncate};

/// Render the four category lanes with their statuses
pub fn render_board_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let collection = app.session.collection();
    let cursor_id = app.cursor_id();
    let dragged_id = app.drag.dragged_id().map(|s| s.to_string());

    let mut lines: Vec<Line> = Vec::new();

    for (lane_index, category) in Category::ALL.iter().enumerate() {
        let category = *category;

        // Lane header; while dragging it doubles as the drop target marker
        let mut header_style = Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::BOLD);
        let mut marker = "";
        if app.mode == Mode::Drag && lane_index == app.drop_cursor {
            let valid = app.drag.can_drop(category, collection);
            header_style = Style::default()
                .fg(if valid { app.theme.green } else { app.theme.red })
                .bg(bg)
                .add_modifier(Modifier::BOLD);
            marker = if valid { " ← drop here" } else { " ← not allowed" };
        }
        lines.push(Line::from(Span::styled(
            format!("{}{}", category.label(), marker),
            header_style,
        )));

        for record in collection.in_category(category) {
            let is_cursor = cursor_id.as_deref() == Some(record.id.as_str());
            let is_dragged = dragged_id.as_deref() == Some(record.id.as_str());

            let row_bg = if is_cursor && app.mode != Mode::Drag {
                app.theme.selection_bg
            } else {
                bg
            };

            let mut spans = vec![
                Span::styled(
                    if is_dragged { " ↳ " } else { "   " },
                    Style::default().fg(app.theme.highlight).bg(row_bg),
                ),
                Span::styled(
                    category_symbol(record.category),
                    Style::default().fg(swatch_color(record.color)).bg(row_bg),
                ),
                Span::styled(" ", Style::default().bg(row_bg)),
            ];

            // Name, edited in place while renaming this status
            if app.mode == Mode::EditName && app.edit_target.as_deref() == Some(&record.id) {
                spans.push(Span::styled(
                    app.edit_buffer.clone(),
                    Style::default().fg(app.theme.text_bright).bg(row_bg),
                ));
                spans.push(Span::styled(
                    "\u{258C}",
                    Style::default().fg(app.theme.highlight).bg(row_bg),
                ));
            } else {
                let name_style = if is_cursor || is_dragged {
                    Style::default().fg(app.theme.text_bright).bg(row_bg)
                } else {
                    Style::default().fg(app.theme.text).bg(row_bg)
                };
                spans.push(Span::styled(
                    truncate(&record.name, width.saturating_sub(24)),
                    name_style,
                ));
            }

            let tasks = app.task_count(&record.id);
            if tasks > 0 {
                spans.push(Span::styled(
                    format!("  {} task{}", tasks, if tasks == 1 { "" } else { "s" }),
                    Style::default().fg(app.theme.dim).bg(row_bg),
                ));
            }
            if record.is_new {
                spans.push(Span::styled(
                    "  new",
                    Style::default().fg(app.theme.yellow).bg(row_bg),
                ));
            }
            spans.push(Span::styled(
                format!("  {}", record.id),
                Style::default().fg(app.theme.dim).bg(row_bg),
            ));

            lines.push(Line::from(spans));
        }

        lines.push(Line::from(Span::styled(
            String::new(),
            Style::default().bg(bg),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
