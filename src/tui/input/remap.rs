use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Keys in the remap popup: pick a surviving status for the doomed one's
/// tasks, or Esc to keep the status after all.
pub(super) fn handle_remap(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if !app.remap_candidates.is_empty() {
                app.remap_cursor = (app.remap_cursor + 1) % app.remap_candidates.len();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if !app.remap_candidates.is_empty() {
                app.remap_cursor = (app.remap_cursor + app.remap_candidates.len() - 1)
                    % app.remap_candidates.len();
            }
        }
        KeyCode::Enter => {
            let Some(target) = app.remap_candidates.get(app.remap_cursor).cloned() else {
                return;
            };
            match app.session.confirm_remap(&target) {
                Ok(()) => {
                    app.remap_candidates.clear();
                    app.remap_cursor = 0;
                    app.clamp_cursor();
                    app.mode = Mode::Navigate;
                }
                Err(e) => {
                    app.status_message = Some(e.to_string());
                }
            }
        }
        KeyCode::Esc => {
            app.session.cancel_remap();
            app.remap_candidates.clear();
            app.remap_cursor = 0;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
