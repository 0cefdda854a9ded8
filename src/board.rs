use std::fmt;
use std::str::FromStr;

use crate::error::{GameError, ParseBoardError};
use crate::types::{Cell, Color, Position, Score};

/// Edge length of the playable area.
pub const BOARD_SIZE: usize = 8;
/// Edge length of the backing grid, including the border ring.
pub const GRID_SIZE: usize = BOARD_SIZE + 2;

/// The playable 8x8 area, rows/cols 1..=8 of the grid.
pub type Interior = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// 10x10 grid: the 8x8 playing area ringed by `Cell::Border` sentinels.
/// The ring lets directional scans stop without separate bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// Creates the initial board:
    /// (4,4)=white, (4,5)=black, (5,4)=black, (5,5)=white.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        for i in 0..GRID_SIZE {
            cells[0][i] = Cell::Border;
            cells[GRID_SIZE - 1][i] = Cell::Border;
            cells[i][0] = Cell::Border;
            cells[i][GRID_SIZE - 1] = Cell::Border;
        }

        let mut board = Self { cells };
        board.assign_initial_color(Color::Black);
        board.assign_initial_color(Color::White);
        board
    }

    /// Raw grid read over 0..=9. `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Reads a cell; coordinates outside the grid read as border.
    pub fn cell(&self, pos: Position) -> Cell {
        self.get(pos.row() as usize, pos.col() as usize)
            .unwrap_or(Cell::Border)
    }

    /// Places a piece. Only playable cells can be written, so the ring
    /// never changes after construction.
    pub(crate) fn set(&mut self, row: usize, col: usize, color: Color) -> Result<(), GameError> {
        if !is_playable(row, col) {
            return Err(GameError::OutOfRangePosition {
                row: row as i32,
                col: col as i32,
            });
        }
        self.cells[row][col] = color.into();
        Ok(())
    }

    /// Seeds the two opening pieces of `color`. Other cells are untouched.
    pub fn assign_initial_color(&mut self, color: Color) {
        let [a, b] = opening_cells(color);
        for pos in [a, b] {
            self.cells[pos.row() as usize][pos.col() as usize] = color.into();
        }
    }

    pub fn count(&self) -> Score {
        let mut score = Score::default();
        for cell in self.cells.iter().flatten() {
            match cell {
                Cell::Black => score.black += 1,
                Cell::White => score.white += 1,
                Cell::Empty | Cell::Border => {}
            }
        }
        score
    }

    /// Copy of rows/cols 1..=8.
    pub fn interior(&self) -> Interior {
        let mut interior = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in interior.iter_mut().enumerate() {
            line.copy_from_slice(&self.cells[row + 1][1..=BOARD_SIZE]);
        }
        interior
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Ten lines of ten space-separated glyphs, border included.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line = row
                .iter()
                .map(|cell| cell.glyph().to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Parses the dump written by `Display`. Blank lines are ignored and the
/// spaces between glyphs are optional.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != GRID_SIZE {
            return Err(ParseBoardError::RowCount {
                expected: GRID_SIZE,
                found: rows.len(),
            });
        }

        let mut cells = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        for (row, line) in rows.iter().enumerate() {
            let glyphs: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if glyphs.len() != GRID_SIZE {
                return Err(ParseBoardError::CellCount {
                    row,
                    expected: GRID_SIZE,
                    found: glyphs.len(),
                });
            }

            for (col, &glyph) in glyphs.iter().enumerate() {
                let cell = Cell::from_glyph(glyph).ok_or_else(|| ParseBoardError::UnknownGlyph {
                    row,
                    col,
                    glyph: glyph.to_string(),
                })?;
                if (cell == Cell::Border) == is_playable(row, col) {
                    return Err(ParseBoardError::Border { row, col });
                }
                cells[row][col] = cell;
            }
        }

        Ok(Self { cells })
    }
}

fn is_playable(row: usize, col: usize) -> bool {
    (1..=BOARD_SIZE).contains(&row) && (1..=BOARD_SIZE).contains(&col)
}

fn opening_cells(color: Color) -> [Position; 2] {
    match color {
        Color::Black => [Position::at(4, 5), Position::at(5, 4)],
        Color::White => [Position::at(4, 4), Position::at(5, 5)],
    }
}
