use crossterm::event::{KeyCode, KeyEvent};

use crate::model::status::{Category, Swatch};

use crate::tui::app::{App, Mode};

/// Keys while a status is picked up: j/k choose the target lane, Enter drops,
/// Esc puts it back. The color picker stays reachable; everything else is
/// vetoed by the controller.
pub(super) fn handle_drag(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.drop_cursor = (app.drop_cursor + 1) % Category::ALL.len();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.drop_cursor = (app.drop_cursor + Category::ALL.len() - 1) % Category::ALL.len();
        }
        KeyCode::Enter | KeyCode::Char('m') => {
            let target = Category::ALL[app.drop_cursor];
            let dragged = app.drag.dragged_id().map(|s| s.to_string());
            if app.drag.drop_on(target, &mut app.session) {
                if let Some(id) = dragged {
                    app.cursor_to(&id);
                }
                app.mode = Mode::Navigate;
            } else {
                app.status_message = Some(format!("cannot drop into {}", target.label()));
            }
        }
        KeyCode::Esc => {
            app.drag.cancel();
            app.mode = Mode::Navigate;
        }
        KeyCode::Char('c') => {
            if let Some(id) = app.drag.dragged_id().map(|s| s.to_string()) {
                let current = app.session.collection().get(&id).map(|s| s.color);
                app.picker_cursor = current
                    .and_then(|c| Swatch::ALL.iter().position(|s| *s == c))
                    .unwrap_or(0);
                app.edit_target = Some(id);
                app.color_returns_to_drag = true;
                app.mode = Mode::PickColor;
            }
        }
        _ => {}
    }
}
