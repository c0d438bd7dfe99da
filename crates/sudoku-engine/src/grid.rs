use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate: row 0-8 (top to bottom), col 0-8 (left to right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9);
        Self { row, col }
    }

    /// All 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..9).flat_map(|row| (0..9).map(move |col| Position { row, col }))
    }

    /// Top-left corner of the 3x3 block containing this position.
    pub fn block_origin(&self) -> Position {
        Position {
            row: self.row - self.row % 3,
            col: self.col - self.col % 3,
        }
    }
}

/// One cell: an optional digit 1-9 and a clue flag.
///
/// A `given` cell belongs to the original puzzle and is not editable
/// through a [`crate::Session`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: Option<u8>,
    given: bool,
}

impl Cell {
    pub fn value(&self) -> Option<u8> {
        self.value
    }

    pub fn is_given(&self) -> bool {
        self.given
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

/// A 9x9 board.
///
/// The grid itself places no constraint on its contents; legality is the
/// business of [`crate::rules`]. The clue mask is carried as the per-cell
/// `given` flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; 9]; 9],
}

impl Grid {
    /// An empty grid with no clues.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Option<u8> {
        self.cells[pos.row][pos.col].value
    }

    /// Write a value (or `None` to clear) without touching the clue flag.
    pub fn set(&mut self, pos: Position, value: Option<u8>) {
        debug_assert!(value.map_or(true, |v| (1..=9).contains(&v)));
        self.cells[pos.row][pos.col].value = value;
    }

    /// Write a value and mark the cell as a clue.
    pub fn set_given(&mut self, pos: Position, value: u8) {
        debug_assert!((1..=9).contains(&value));
        self.cells[pos.row][pos.col] = Cell {
            value: Some(value),
            given: true,
        };
    }

    /// Clear the value and the clue flag.
    pub fn clear(&mut self, pos: Position) {
        self.cells[pos.row][pos.col] = Cell::default();
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.row][pos.col]
    }

    /// True when every cell holds a value. Says nothing about legality.
    pub fn is_filled(&self) -> bool {
        Position::all().all(|pos| self.get(pos).is_some())
    }

    pub fn given_count(&self) -> usize {
        Position::all().filter(|&pos| self.cell(pos).is_given()).count()
    }

    pub fn empty_count(&self) -> usize {
        Position::all().filter(|&pos| self.get(pos).is_none()).count()
    }

    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.get(pos).is_none()).collect()
    }

    /// First empty cell in row-major order. The solver's scan order.
    pub fn first_empty(&self) -> Option<Position> {
        Position::all().find(|&pos| self.get(pos).is_none())
    }

    /// Snapshot of all values.
    pub fn values(&self) -> [[Option<u8>; 9]; 9] {
        std::array::from_fn(|r| std::array::from_fn(|c| self.cells[r][c].value))
    }

    /// The clue mask: `true` where the cell is part of the original puzzle.
    pub fn clue_mask(&self) -> [[bool; 9]; 9] {
        std::array::from_fn(|r| std::array::from_fn(|c| self.cells[r][c].given))
    }

    /// Parse an 81-character string, row-major; `0` or `.` is an empty
    /// cell. Every filled cell becomes a clue.
    pub fn from_string(s: &str) -> Result<Self, EngineError> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 81 {
            return Err(EngineError::MalformedPuzzle(format!(
                "expected 81 cells, got {}",
                chars.len()
            )));
        }

        let mut grid = Grid::new();
        for (i, &ch) in chars.iter().enumerate() {
            let pos = Position::new(i / 9, i % 9);
            match ch {
                '0' | '.' => {}
                '1'..='9' => grid.set_given(pos, ch as u8 - b'0'),
                _ => {
                    return Err(EngineError::MalformedPuzzle(format!(
                        "invalid character {ch:?} at cell {i}"
                    )))
                }
            }
        }
        Ok(grid)
    }

    /// 81-character compact form, `0` for empty cells.
    pub fn to_string_compact(&self) -> String {
        Position::all()
            .map(|pos| match self.get(pos) {
                Some(v) => (b'0' + v) as char,
                None => '0',
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            if row % 3 == 0 && row != 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..9 {
                if col % 3 == 0 && col != 0 {
                    write!(f, "| ")?;
                }
                match self.cells[row][col].value {
                    Some(v) => write!(f, "{v} ")?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASY: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn test_from_string_round_trip() {
        let grid = Grid::from_string(EASY).unwrap();
        assert_eq!(grid.to_string_compact(), EASY);
        assert_eq!(grid.get(Position::new(0, 0)), Some(5));
        assert_eq!(grid.get(Position::new(0, 2)), None);
        assert!(grid.cell(Position::new(0, 0)).is_given());
        assert!(!grid.cell(Position::new(0, 2)).is_given());
    }

    #[test]
    fn test_from_string_rejects_bad_input() {
        assert!(Grid::from_string("12345").is_err());
        let mut bad = EASY.to_string();
        bad.replace_range(0..1, "x");
        assert!(Grid::from_string(&bad).is_err());
    }

    #[test]
    fn test_dots_parse_as_empty() {
        let dotted = EASY.replace('0', ".");
        let grid = Grid::from_string(&dotted).unwrap();
        assert_eq!(grid.to_string_compact(), EASY);
    }

    #[test]
    fn test_set_preserves_clue_flag() {
        let mut grid = Grid::from_string(EASY).unwrap();
        let pos = Position::new(0, 2);
        grid.set(pos, Some(4));
        assert_eq!(grid.get(pos), Some(4));
        assert!(!grid.cell(pos).is_given());
    }

    #[test]
    fn test_counts() {
        let grid = Grid::from_string(EASY).unwrap();
        assert_eq!(grid.given_count(), 30);
        assert_eq!(grid.empty_count(), 51);
        assert_eq!(grid.empty_positions().len(), 51);
        assert!(!grid.is_filled());
        assert_eq!(grid.first_empty(), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_block_origin() {
        assert_eq!(Position::new(4, 7).block_origin(), Position::new(3, 6));
        assert_eq!(Position::new(0, 0).block_origin(), Position::new(0, 0));
        assert_eq!(Position::new(8, 8).block_origin(), Position::new(6, 6));
    }

    #[test]
    fn test_serde_round_trip() {
        let grid = Grid::from_string(EASY).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
