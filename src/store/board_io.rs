use std::fs;
use std::path::{Path, PathBuf};

use crate::model::board::Board;
use crate::model::config::{BoardConfig, BoardInfo, UiConfig};
use crate::model::template::Template;
use crate::ops::session::EditSession;
use crate::ops::status_ops;
use crate::store::{StoreError, commit_session};

use super::json::JsonStore;

const SLATE_DIR: &str = "slate";
const CONFIG_FILE: &str = "board.toml";

/// Discover the board by walking up from the given directory, looking for a
/// `slate/` subdirectory with a board.toml in it.
pub fn discover_board(start: &Path) -> Result<PathBuf, StoreError> {
    let mut current = start.to_path_buf();
    loop {
        let slate_dir = current.join(SLATE_DIR);
        if slate_dir.is_dir() && slate_dir.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(StoreError::NotABoard);
        }
    }
}

/// Load board config and store from the given root directory
pub fn load_board(root: &Path) -> Result<(Board, JsonStore), StoreError> {
    let slate_dir = root.join(SLATE_DIR);
    if !slate_dir.is_dir() {
        return Err(StoreError::NotABoard);
    }

    let config_path = slate_dir.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| StoreError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: BoardConfig = toml::from_str(&config_text)?;

    let store = JsonStore::load(&slate_dir)?;
    let board = Board {
        root: root.to_path_buf(),
        slate_dir,
        config,
    };
    Ok((board, store))
}

/// Persist the board config back to board.toml
pub fn save_config(board: &Board) -> Result<(), StoreError> {
    let text = toml::to_string_pretty(&board.config)?;
    fs::write(board.slate_dir.join(CONFIG_FILE), text)?;
    Ok(())
}

/// Create a new board at `root`, seeded from a template.
///
/// The template's statuses go through the same reducer primitives as
/// interactive editing and land in the store via a normal commit.
pub fn init_board(root: &Path, name: &str, template: &Template) -> Result<Board, StoreError> {
    // validate the seeded collection before touching the filesystem
    let session = EditSession::new(status_ops::from_template(template));
    let violations = session.violations();
    if !violations.is_empty() {
        let messages: Vec<String> = violations.iter().map(|v| v.message()).collect();
        return Err(StoreError::InvalidTemplate(messages.join(" ")));
    }

    let slate_dir = root.join(SLATE_DIR);
    fs::create_dir_all(&slate_dir)?;

    let config = BoardConfig {
        board: BoardInfo {
            name: name.to_string(),
            template: Some(template.id.clone()),
            created: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
        },
        ui: UiConfig::default(),
    };
    let board = Board {
        root: root.to_path_buf(),
        slate_dir: slate_dir.clone(),
        config,
    };
    save_config(&board)?;

    let mut store = JsonStore::create(&slate_dir)?;
    commit_session(&mut store, &session)?;

    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::template::find_template;

    #[test]
    fn init_then_discover_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let template = find_template("basic").unwrap();
        init_board(dir.path(), "My Board", &template).unwrap();

        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        let root = discover_board(&nested).unwrap();
        assert_eq!(root, dir.path());

        let (board, store) = load_board(&root).unwrap();
        assert_eq!(board.config.board.name, "My Board");
        assert_eq!(board.config.board.template.as_deref(), Some("basic"));
        assert_eq!(store.collection().len(), 3);
    }

    #[test]
    fn discover_fails_outside_a_board() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            discover_board(dir.path()),
            Err(StoreError::NotABoard)
        ));
    }
}
