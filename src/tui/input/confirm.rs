use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_confirm_quit(app: &mut App, key: KeyEvent) {
    match key.code {
        // Discard unsaved edits and quit
        KeyCode::Char('y') => {
            app.should_quit = true;
        }
        // Save, then quit if the save went through
        KeyCode::Char('s') => {
            app.save();
            if !app.session.is_dirty() {
                app.should_quit = true;
            } else {
                app.mode = Mode::Navigate;
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
