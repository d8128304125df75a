mod confirm;
mod drag_mode;
mod edit;
mod navigate;
mod remap;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use drag_mode::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use remap::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // Any keypress clears the previous one-shot message
    app.status_message = None;

    // Help overlay intercepts all input
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::EditName => handle_edit_name(app, key),
        Mode::PickColor => handle_pick_color(app, key),
        Mode::PickCategory => handle_pick_category(app, key),
        Mode::Drag => handle_drag(app, key),
        Mode::Remap => handle_remap(app, key),
        Mode::ConfirmQuit => handle_confirm_quit(app, key),
    }
}
