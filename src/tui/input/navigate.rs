use crossterm::event::{KeyCode, KeyEvent};

use crate::model::status::Category;
use crate::ops::drag::EditAction;
use crate::ops::session::RemovalOutcome;
use crate::ops::status_ops::Direction;

use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            if app.session.is_dirty() {
                app.mode = Mode::ConfirmQuit;
            } else {
                app.should_quit = true;
            }
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.display_ids().len();
            if len > 0 && app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        // Reorder within the lane
        KeyCode::Char('J') => reorder_cursor(app, Direction::Down),
        KeyCode::Char('K') => reorder_cursor(app, Direction::Up),
        KeyCode::Char('a') => {
            if app.drag.permits(EditAction::Add) {
                app.picker_cursor = 0;
                app.mode = Mode::PickCategory;
            }
        }
        KeyCode::Char('r') => {
            if !app.drag.permits(EditAction::Rename) {
                return;
            }
            if let Some(id) = app.cursor_id() {
                app.edit_buffer = app
                    .session
                    .collection()
                    .get(&id)
                    .map(|s| s.name.clone())
                    .unwrap_or_default();
                app.edit_target = Some(id);
                app.mode = Mode::EditName;
            }
        }
        KeyCode::Char('c') => {
            if let Some(id) = app.cursor_id() {
                let current = app.session.collection().get(&id).map(|s| s.color);
                app.picker_cursor = current
                    .and_then(|c| crate::model::Swatch::ALL.iter().position(|s| *s == c))
                    .unwrap_or(0);
                app.edit_target = Some(id);
                app.color_returns_to_drag = false;
                app.mode = Mode::PickColor;
            }
        }
        KeyCode::Char('t') => {
            if !app.drag.permits(EditAction::CycleCategory) {
                return;
            }
            if let Some(id) = app.cursor_id() {
                app.session.cycle_category(&id);
                app.cursor_to(&id);
            }
        }
        KeyCode::Char('m') => {
            if let Some(id) = app.cursor_id()
                && app.drag.begin(&id, app.session.collection())
            {
                let category = app
                    .session
                    .collection()
                    .get(&id)
                    .map(|s| s.category)
                    .unwrap_or(Category::Todo);
                app.drop_cursor = Category::ALL
                    .iter()
                    .position(|c| *c == category)
                    .unwrap_or(0);
                app.mode = Mode::Drag;
            }
        }
        KeyCode::Char('d') => request_delete(app),
        KeyCode::Char('s') => app.save(),
        _ => {}
    }
}

fn reorder_cursor(app: &mut App, direction: Direction) {
    if !app.drag.permits(crate::ops::drag::EditAction::Reorder) {
        return;
    }
    if let Some(id) = app.cursor_id() {
        app.session.reorder(&id, direction);
        app.cursor_to(&id);
    }
}

/// Start the deletion flow for the status under the cursor
pub(super) fn request_delete(app: &mut App) {
    if !app.drag.permits(EditAction::Delete) {
        return;
    }
    let Some(id) = app.cursor_id() else {
        return;
    };
    let live_tasks = app.task_count(&id);
    match app.session.remove(&id, live_tasks) {
        Ok(RemovalOutcome::Removed) => {
            app.clamp_cursor();
        }
        Ok(RemovalOutcome::NeedsRemap { candidates, .. }) => {
            app.remap_candidates = candidates;
            app.remap_cursor = 0;
            app.mode = Mode::Remap;
        }
        Err(e) => {
            app.status_message = Some(e.to_string());
        }
    }
}
