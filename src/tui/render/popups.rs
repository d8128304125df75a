use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::status::{Category, Swatch};
use crate::ops::validate::can_add_to;
use crate::tui::app::App;

use super::helpers::swatch_color;

/// Center a popup of the given size within `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn popup_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .style(Style::default().bg(app.theme.background))
        .title(title)
}

pub fn render_color_picker(frame: &mut Frame, app: &App, area: Rect) {
    let rect = centered(area, 24, Swatch::ALL.len() as u16 + 2);
    frame.render_widget(Clear, rect);

    let mut lines = Vec::new();
    for (i, swatch) in Swatch::ALL.iter().enumerate() {
        let selected = i == app.picker_cursor;
        let style = if selected {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(app.theme.background)
        };
        lines.push(Line::from(vec![
            Span::styled(
                if selected { " > " } else { "   " },
                style,
            ),
            Span::styled("● ", Style::default().fg(swatch_color(*swatch)).bg(style.bg.unwrap_or(app.theme.background))),
            Span::styled(swatch.name().to_string(), style),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines).block(popup_block(app, " color ")),
        rect,
    );
}

pub fn render_category_picker(frame: &mut Frame, app: &App, area: Rect) {
    let rect = centered(area, 32, Category::ALL.len() as u16 + 2);
    frame.render_widget(Clear, rect);

    let mut lines = Vec::new();
    for (i, category) in Category::ALL.iter().enumerate() {
        let selected = i == app.picker_cursor;
        let allowed = can_add_to(*category, app.session.collection());
        let fg = if !allowed {
            app.theme.dim
        } else if selected {
            app.theme.text_bright
        } else {
            app.theme.text
        };
        let style = Style::default().fg(fg).bg(if selected {
            app.theme.selection_bg
        } else {
            app.theme.background
        });
        let note = if allowed { "" } else { "  (occupied)" };
        lines.push(Line::from(Span::styled(
            format!(
                "{}{}{}",
                if selected { " > " } else { "   " },
                category.label(),
                note
            ),
            style,
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(popup_block(app, " add status to ")),
        rect,
    );
}

pub fn render_remap_popup(frame: &mut Frame, app: &App, area: Rect) {
    let pending = app.session.pending_remap();
    let title = match pending {
        Some(p) => {
            let name = app
                .session
                .collection()
                .get(&p.id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| p.id.clone());
            format!(
                " {} task{} on \"{}\" — move them to ",
                p.task_count,
                if p.task_count == 1 { "" } else { "s" },
                name
            )
        }
        None => " move tasks to ".to_string(),
    };

    let height = app.remap_candidates.len() as u16 + 2;
    let rect = centered(area, (title.len() as u16 + 4).max(36), height);
    frame.render_widget(Clear, rect);

    let mut lines = Vec::new();
    for (i, id) in app.remap_candidates.iter().enumerate() {
        let selected = i == app.remap_cursor;
        let record = app.session.collection().get(id);
        let name = record.map(|s| s.name.as_str()).unwrap_or(id.as_str());
        let style = if selected {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(app.theme.background)
        };
        let mut spans = vec![Span::styled(
            if selected { " > " } else { "   " },
            style,
        )];
        if let Some(record) = record {
            spans.push(Span::styled(
                "● ",
                Style::default()
                    .fg(swatch_color(record.color))
                    .bg(style.bg.unwrap_or(app.theme.background)),
            ));
        }
        spans.push(Span::styled(name.to_string(), style));
        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .style(Style::default().bg(app.theme.background))
        .title(title);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

pub fn render_quit_popup(frame: &mut Frame, app: &App, area: Rect) {
    let rect = centered(area, 44, 4);
    frame.render_widget(Clear, rect);
    let lines = vec![
        Line::from(Span::styled(
            " You have unsaved changes.",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.background),
        )),
        Line::from(Span::styled(
            " y discard · s save and quit · n go back",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(popup_block(app, " quit ")),
        rect,
    );
}
