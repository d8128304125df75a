use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::board::Board;
use crate::ops::drag::DragController;
use crate::ops::session::EditSession;
use crate::store::board_io::{discover_board, load_board};
use crate::store::json::JsonStore;
use crate::store::{StatusStore, commit_session};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Renaming the status in `edit_target`
    EditName,
    /// Picking a swatch color for `edit_target`
    PickColor,
    /// Picking a category for a new status
    PickCategory,
    /// A status is picked up; j/k choose the target lane
    Drag,
    /// Choosing where a doomed status's tasks go
    Remap,
    /// Quit with unsaved changes
    ConfirmQuit,
}

/// Main application state
pub struct App {
    pub board: Board,
    pub store: JsonStore,
    pub session: EditSession,
    pub drag: DragController,
    pub mode: Mode,
    pub theme: Theme,
    pub should_quit: bool,
    /// Cursor index into the display-ordered status list
    pub cursor: usize,
    /// Target lane index (into Category::ALL) while dragging
    pub drop_cursor: usize,
    /// Cursor for the color/category pickers
    pub picker_cursor: usize,
    /// Status id being renamed or recolored
    pub edit_target: Option<String>,
    pub edit_buffer: String,
    /// After PickColor, return to Drag instead of Navigate
    pub color_returns_to_drag: bool,
    /// Candidate target ids for the remap popup
    pub remap_candidates: Vec<String>,
    pub remap_cursor: usize,
    /// One-shot message shown in the status row
    pub status_message: Option<String>,
    pub show_help: bool,
    /// Save in flight; the save affordance is disabled while set
    pub saving: bool,
}

impl App {
    pub fn new(board: Board, store: JsonStore) -> Self {
        let session = EditSession::new(store.collection());
        let theme = Theme::from_config(&board.config.ui);
        App {
            board,
            store,
            session,
            drag: DragController::new(),
            mode: Mode::Navigate,
            theme,
            should_quit: false,
            cursor: 0,
            drop_cursor: 0,
            picker_cursor: 0,
            edit_target: None,
            edit_buffer: String::new(),
            color_returns_to_drag: false,
            remap_candidates: Vec::new(),
            remap_cursor: 0,
            status_message: None,
            show_help: false,
            saving: false,
        }
    }

    /// Status ids in display order (the cursor list)
    pub fn display_ids(&self) -> Vec<String> {
        self.session.collection().display_ids()
    }

    /// The status id under the cursor
    pub fn cursor_id(&self) -> Option<String> {
        self.display_ids().get(self.cursor).cloned()
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.display_ids().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Move the cursor to a specific status
    pub fn cursor_to(&mut self, id: &str) {
        if let Some(index) = self.display_ids().iter().position(|i| i == id) {
            self.cursor = index;
        }
    }

    /// Live task count for a status, straight from the store
    pub fn task_count(&self, id: &str) -> usize {
        self.store.count_tasks_referencing(id).unwrap_or(0)
    }

    /// Commit the session. Refused while invariants are violated or a save
    /// is already in flight.
    pub fn save(&mut self) {
        if self.saving {
            return;
        }
        let violations = self.session.violations();
        if !violations.is_empty() {
            let messages: Vec<String> = violations.iter().map(|v| v.message()).collect();
            self.status_message = Some(messages.join(" "));
            return;
        }
        self.saving = true;
        match commit_session(&mut self.store, &self.session) {
            Ok(summary) => {
                self.session.mark_committed();
                self.status_message = Some(format!("saved {} statuses", summary.upserted));
            }
            Err(e) => {
                // session is left as edited; the user may retry
                self.status_message = Some(format!("save failed: {}", e));
            }
        }
        self.saving = false;
    }
}

/// Run the TUI application
pub fn run(board_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match board_dir {
        Some(dir) => std::fs::canonicalize(dir)?,
        None => std::env::current_dir()?,
    };
    let root = discover_board(&start)?;
    let (board, store) = load_board(&root)?;

    let mut app = App::new(board, store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
