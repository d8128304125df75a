use std::path::PathBuf;

use super::config::BoardConfig;

/// A fully loaded slate board
#[derive(Debug)]
pub struct Board {
    /// Root directory of the board (parent of `slate/`)
    pub root: PathBuf,
    /// Path to the `slate/` directory
    pub slate_dir: PathBuf,
    /// Parsed board.toml
    pub config: BoardConfig,
}
