use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::board::{BOARD_SIZE, Interior};
use crate::error::GameError;

/// One of the two sides. Used both for player color and for piece contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the `"black"` / `"white"` color tokens (case-insensitive).
impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(Self::Black),
            "white" => Ok(Self::White),
            _ => Err(GameError::UnknownColor(s.to_string())),
        }
    }
}

/// Contents of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Border,
    Black,
    White,
}

impl Cell {
    /// Display glyph: `*` border, `.` empty, `X` black, `O` white.
    pub fn glyph(self) -> char {
        match self {
            Self::Border => '*',
            Self::Empty => '.',
            Self::Black => 'X',
            Self::White => 'O',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '*' => Some(Self::Border),
            '.' => Some(Self::Empty),
            'X' => Some(Self::Black),
            'O' => Some(Self::White),
            _ => None,
        }
    }

    /// The color of the piece in this cell, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Black => Some(Color::Black),
            Self::White => Some(Color::White),
            Self::Empty | Self::Border => None,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Self::Black,
            Color::White => Self::White,
        }
    }
}

/// A playable board coordinate. Rows and columns are 1-based (1..=8);
/// row/col 0 and 9 belong to the border ring. Only `Position::new` builds
/// one from caller input, so every value is inside the playable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Validates a caller-supplied coordinate against the playable range.
    pub fn new(row: i32, col: i32) -> Result<Self, GameError> {
        let playable = 1..=BOARD_SIZE as i32;
        if !playable.contains(&row) || !playable.contains(&col) {
            return Err(GameError::OutOfRangePosition { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    /// Position mirrored through the board center.
    pub fn rotated(self) -> Self {
        let far = BOARD_SIZE as u8 + 1;
        Self {
            row: far - self.row,
            col: far - self.col,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A registered player. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    name: String,
    color: Color,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Turn protocol. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    WaitingForBlack,
    WaitingForWhite,
    Ended,
}

impl TurnState {
    pub fn waiting_for(color: Color) -> Self {
        match color {
            Color::Black => Self::WaitingForBlack,
            Color::White => Self::WaitingForWhite,
        }
    }

    pub fn side_to_move(self) -> Option<Color> {
        match self {
            Self::WaitingForBlack => Some(Color::Black),
            Self::WaitingForWhite => Some(Color::White),
            Self::Ended => None,
        }
    }
}

/// Piece counts. Border and empty cells are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

impl Score {
    pub fn total(self) -> u8 {
        self.black + self.white
    }

    pub fn of(self, color: Color) -> u8 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }
}

/// Result of comparing the piece counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Win {
        color: Color,
        /// The player registered for the winning color, if any.
        player: Option<Player>,
    },
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win {
                color,
                player: Some(player),
            } => write!(f, "Winner is {color} player: {}", player.name()),
            Self::Win {
                color,
                player: None,
            } => write!(f, "Winner is {color} player"),
            Self::Tie => f.write_str("It's a tie"),
        }
    }
}

/// End-of-game report: final counts plus the winner statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalReport {
    pub score: Score,
    pub outcome: Outcome,
}

impl fmt::Display for FinalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "White Piece: {} Black Piece: {}",
            self.score.white, self.score.black
        )?;
        write!(f, "{}", self.outcome)
    }
}

/// Answer to a move submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnReport {
    Moved {
        board: Interior,
        flipped: Vec<Position>,
        state: TurnState,
        /// Present once the move ended the game.
        final_report: Option<FinalReport>,
    },
    /// Nothing was changed. `legal` holds the moves available to the side to move.
    Rejected {
        #[serde(rename = "reason", serialize_with = "as_message")]
        error: GameError,
        legal: Vec<Position>,
    },
}

impl TurnReport {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

fn as_message<S: Serializer>(error: &GameError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
