use crossterm::event::{KeyCode, KeyEvent};

use crate::model::status::{Category, Swatch};
use crate::ops::validate::can_add_to;

use crate::tui::app::{App, Mode};

pub(super) fn handle_edit_name(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            if let Some(id) = app.edit_target.take() {
                app.session.rename(&id, &app.edit_buffer);
            }
            app.edit_buffer.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            app.edit_target = None;
            app.edit_buffer.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.edit_buffer.push(c);
        }
        _ => {}
    }
}

pub(super) fn handle_pick_color(app: &mut App, key: KeyEvent) {
    let back = if app.color_returns_to_drag {
        Mode::Drag
    } else {
        Mode::Navigate
    };
    match key.code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('l') | KeyCode::Right => {
            app.picker_cursor = (app.picker_cursor + 1) % Swatch::ALL.len();
        }
        KeyCode::Char('k') | KeyCode::Up | KeyCode::Char('h') | KeyCode::Left => {
            app.picker_cursor = (app.picker_cursor + Swatch::ALL.len() - 1) % Swatch::ALL.len();
        }
        KeyCode::Enter => {
            if let Some(id) = app.edit_target.take() {
                app.session.recolor(&id, Swatch::ALL[app.picker_cursor]);
            }
            app.color_returns_to_drag = false;
            app.mode = back;
        }
        KeyCode::Esc => {
            app.edit_target = None;
            app.color_returns_to_drag = false;
            app.mode = back;
        }
        _ => {}
    }
}

pub(super) fn handle_pick_category(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.picker_cursor = (app.picker_cursor + 1) % Category::ALL.len();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.picker_cursor =
                (app.picker_cursor + Category::ALL.len() - 1) % Category::ALL.len();
        }
        KeyCode::Enter => {
            let category = Category::ALL[app.picker_cursor];
            if !can_add_to(category, app.session.collection()) {
                app.status_message = Some(format!(
                    "{} already has a status; it allows only one",
                    category.label()
                ));
                return;
            }
            if let Some(id) = app.session.add(category) {
                // go straight to naming the new status
                app.cursor_to(&id);
                app.edit_buffer.clear();
                app.edit_target = Some(id);
                app.mode = Mode::EditName;
            } else {
                app.mode = Mode::Navigate;
            }
        }
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
