use std::io;

use thiserror::Error;

/// Errors surfaced by the library and the terminal runtime.
///
/// Hitting a wall or the figure itself is a `game_over` transition, not an
/// error, so it has no variant here.
#[derive(Debug, Error)]
pub enum SnakeError {
    /// A render row received a different number of ids than cells.
    #[error("number of cells and ids is not equal: {cells} cells, {ids} ids")]
    ShapeMismatch { cells: usize, ids: usize },

    #[error("a figure needs at least one segment")]
    EmptyFigure,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = SnakeError> = std::result::Result<T, E>;
