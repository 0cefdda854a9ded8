use thiserror::Error;

use crate::types::{Color, Position};

/// Every way a caller request can be refused. None of these are fatal:
/// the engine is left untouched and the caller may retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid move {position} for {color}; legal moves: {}", list(.legal))]
    InvalidMove {
        color: Color,
        position: Position,
        legal: Vec<Position>,
    },
    #[error("position ({row}, {col}) is outside the board")]
    OutOfRangePosition { row: i32, col: i32 },
    #[error("it is {expected}'s turn, not {got}'s")]
    WrongTurn { expected: Color, got: Color },
    #[error("game is already over")]
    GameOver,
    #[error("{0} has legal moves and cannot pass")]
    PassNotAllowed(Color),
    #[error("a {0} player is already registered")]
    ColorTaken(Color),
    #[error("players cannot be registered after the first move")]
    RegistrationClosed,
    #[error("unknown color {0:?}, expected \"black\" or \"white\"")]
    UnknownColor(String),
}

impl GameError {
    /// True for rejections a UI answers by re-prompting with the legal moves.
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            Self::InvalidMove { .. }
                | Self::OutOfRangePosition { .. }
                | Self::WrongTurn { .. }
                | Self::GameOver
        )
    }
}

/// Failure to read a textual board dump.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row}: expected {expected} cells, found {found}")]
    CellCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}, col {col}: unknown glyph {glyph:?}")]
    UnknownGlyph { row: usize, col: usize, glyph: String },
    #[error("row {row}, col {col}: border ring must be '*' and the interior must not be")]
    Border { row: usize, col: usize },
}

fn list(positions: &[Position]) -> String {
    if positions.is_empty() {
        return "none".to_string();
    }
    positions
        .iter()
        .map(Position::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
