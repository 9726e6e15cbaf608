//! Error types surfaced to callers.
//!
//! Dead ends inside the search are not errors: they are recovered by
//! restarting a broader phase. Only configuration problems, malformed input
//! and an exhausted outer attempt cap reach the caller.

use thiserror::Error;

/// An invalid [`GameConfig`](crate::config::GameConfig) or board size.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown board size `{0}`, expected `small` or `standard`")]
    UnknownBoardSize(String),

    #[error("board dimensions must be non-zero, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },

    #[error("`{field}` must be at least 1")]
    ZeroTries { field: &'static str },

    #[error("group bounds {min}..={max} are inverted")]
    InvertedGroupBounds { min: usize, max: usize },

    #[error("hint bounds {min}..={max} are inverted")]
    InvertedHintBounds { min: usize, max: usize },

    #[error("group bounds {min}..={max} cannot be seeded on this board, which seeds {fewest}..={most}")]
    UnreachableGroupCount {
        min: usize,
        max: usize,
        fewest: usize,
        most: usize,
    },

    #[error("{max} groups of at most 5 cells cannot cover {cells} cells")]
    TooFewGroups { max: usize, cells: usize },
}

/// Malformed board data, either serialized input or an unfinished state.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("crop must be between 1 and 5, got {0}")]
    InvalidCrop(u8),

    #[error("serialized board has no cells")]
    EmptyBoard,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell at row {row}, column {column} claims coordinates ({x}, {y})")]
    CoordinateMismatch {
        row: usize,
        column: usize,
        x: usize,
        y: usize,
    },

    #[error("cell ({x}, {y}) is incomplete")]
    IncompleteCell { x: usize, y: usize },

    #[error("coordinates ({x}, {y}) are outside the board")]
    OutOfBounds { x: usize, y: usize },

    #[error("invalid board JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a whole generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("no valid board found after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    #[error("board generation was cancelled")]
    Cancelled,
}
