//! Coordinate math for the 4x4 board.
//!
//! Cells are addressed by a two-character code: a row letter `a`..`d`
//! followed by a column digit `1`..`4`. `a1` is the top-left corner and
//! `d4` the bottom-right one. Everything here is pure; invalid input yields
//! `None` or `false`, never a panic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of rows (and columns) on the board
pub const GRID_SIZE: usize = 4;

/// Total number of cells on the board
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Error returned when a string is not a valid cell code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cell code `{0}`")]
pub struct InvalidPosition(pub String);

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Build a position from zero-based row and column
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        if row < GRID_SIZE && col < GRID_SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Build a position from a row-major cell index (0..16)
    pub fn from_index(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            Self::from_coords(index / GRID_SIZE, index % GRID_SIZE)
        } else {
            None
        }
    }

    /// Parse a cell code such as `b3`
    pub fn parse(code: &str) -> Option<Self> {
        match code.as_bytes() {
            [r @ b'a'..=b'd', c @ b'1'..=b'4'] => Some(Self {
                row: r - b'a',
                col: c - b'1',
            }),
            _ => None,
        }
    }

    /// Zero-based row
    pub fn row(&self) -> usize {
        self.row as usize
    }

    /// Zero-based column
    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// `(row, col)` pair, both zero-based
    pub fn coords(&self) -> (usize, usize) {
        (self.row(), self.col())
    }

    /// Row-major index (0..16)
    pub fn index(&self) -> usize {
        self.row() * GRID_SIZE + self.col()
    }

    /// Row letter of the cell code
    pub fn row_char(&self) -> char {
        (b'a' + self.row) as char
    }

    /// Column digit of the cell code
    pub fn col_char(&self) -> char {
        (b'1' + self.col) as char
    }

    /// Check 8-directional adjacency. A cell is not adjacent to itself.
    pub fn is_adjacent(&self, other: Position) -> bool {
        *self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }

    /// All 16 positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).filter_map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_char(), self.col_char())
    }
}

impl FromStr for Position {
    type Err = InvalidPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::parse(s).ok_or_else(|| InvalidPosition(s.to_string()))
    }
}

impl TryFrom<String> for Position {
    type Error = InvalidPosition;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> Self {
        pos.to_string()
    }
}

/// Check whether `code` names a cell on the board
pub fn is_valid_position(code: &str) -> bool {
    Position::parse(code).is_some()
}

/// Check whether two cell codes are distinct neighbours (diagonals included)
pub fn are_adjacent(a: &str, b: &str) -> bool {
    match (Position::parse(a), Position::parse(b)) {
        (Some(a), Some(b)) => a.is_adjacent(b),
        _ => false,
    }
}

/// Zero-based `(row, col)` of a cell code
pub fn to_coords(code: &str) -> Option<(usize, usize)> {
    Position::parse(code).map(|p| p.coords())
}

/// Cell at zero-based `(row, col)`
pub fn from_coords(row: usize, col: usize) -> Option<Position> {
    Position::from_coords(row, col)
}

/// Concatenate cell codes, e.g. `[a1, a2]` becomes `"a1a2"`
pub fn encode_path(path: &[Position]) -> String {
    let mut encoded = String::with_capacity(path.len() * 2);
    for pos in path {
        encoded.push(pos.row_char());
        encoded.push(pos.col_char());
    }
    encoded
}

/// Split an encoded path back into positions.
///
/// Returns `None` for odd-length input or any invalid code.
pub fn decode_path(encoded: &str) -> Option<Vec<Position>> {
    let bytes = encoded.as_bytes();
    if bytes.len() % 2 != 0 {
        return None;
    }
    bytes
        .chunks(2)
        .map(|chunk| std::str::from_utf8(chunk).ok().and_then(Position::parse))
        .collect()
}
