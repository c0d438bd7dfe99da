//! The constraint checker.
//!
//! [`is_legal`] is the single constraint primitive of the engine: the
//! solver, the candidate query, and whole-grid validation all compose it
//! rather than scanning rows, columns, or blocks themselves.

use crate::bitset::DigitSet;
use crate::grid::{Grid, Position};

/// Is placing `value` at `pos` legal given the current grid contents?
///
/// False if `value` already occurs anywhere in the row, the column, or
/// the 3x3 block containing `pos` - including at `pos` itself. Pure; the
/// grid is not modified.
pub fn is_legal(grid: &Grid, pos: Position, value: u8) -> bool {
    debug_assert!((1..=9).contains(&value));

    for i in 0..9 {
        if grid.get(Position::new(pos.row, i)) == Some(value) {
            return false;
        }
        if grid.get(Position::new(i, pos.col)) == Some(value) {
            return false;
        }
    }

    let origin = pos.block_origin();
    for row in origin.row..origin.row + 3 {
        for col in origin.col..origin.col + 3 {
            if grid.get(Position::new(row, col)) == Some(value) {
                return false;
            }
        }
    }

    true
}

/// All digits that could legally be placed in `pos`.
///
/// Empty set for a filled cell.
pub fn legal_digits(grid: &Grid, pos: Position) -> DigitSet {
    if grid.get(pos).is_some() {
        return DigitSet::empty();
    }
    (1..=9).filter(|&d| is_legal(grid, pos, d)).collect()
}

/// Full revalidation: every filled cell's value must be legal with the
/// cell itself cleared. A complete grid passing this check has every
/// row, column, and block as a permutation of 1-9.
pub fn is_valid(grid: &Grid) -> bool {
    let mut scratch = grid.clone();
    for pos in Position::all() {
        if let Some(value) = scratch.get(pos) {
            scratch.set(pos, None);
            let legal = is_legal(&scratch, pos, value);
            scratch.set(pos, Some(value));
            if !legal {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn row0_grid() -> Grid {
        // Canonical solved row 0 only: [5,3,4,6,7,8,9,1,2]
        let mut s = String::from("534678912");
        s.push_str(&"0".repeat(72));
        Grid::from_string(&s).unwrap()
    }

    #[test]
    fn test_row_conflict() {
        let grid = row0_grid();
        // 5 already present in row 0
        assert!(!is_legal(&grid, Position::new(0, 0), 5));
        assert!(!is_legal(&grid, Position::new(0, 8), 5));
    }

    #[test]
    fn test_column_and_block_conflict() {
        let grid = row0_grid();
        // (1,0) shares column 0 and block 0 with the 5 at (0,0)
        assert!(!is_legal(&grid, Position::new(1, 0), 5));
        // ...and block 0 with the 3 at (0,1)
        assert!(!is_legal(&grid, Position::new(1, 0), 3));
        // 1 only occurs at (0,7): fine in column 0
        assert!(is_legal(&grid, Position::new(1, 0), 1));
    }

    #[test]
    fn test_independent_of_call_order() {
        let grid = row0_grid();
        let first = is_legal(&grid, Position::new(1, 0), 5);
        for _ in 0..10 {
            assert_eq!(is_legal(&grid, Position::new(1, 0), 5), first);
        }
    }

    #[test]
    fn test_legal_digits() {
        let grid = row0_grid();
        let digits = legal_digits(&grid, Position::new(0, 0));
        assert!(digits.is_empty(), "filled cell has no candidates");

        let digits = legal_digits(&grid, Position::new(8, 8));
        // Row 8, col 8, block 8 are empty apart from column 8's 2
        assert!(!digits.contains(2));
        assert_eq!(digits.len(), 8);
    }

    #[test]
    fn test_is_valid_accepts_solved_grid() {
        let grid = Grid::from_string(SOLVED).unwrap();
        assert!(is_valid(&grid));
    }

    #[test]
    fn test_is_valid_rejects_duplicate() {
        let mut s = SOLVED.to_string();
        // Copy (0,0)'s 5 onto (0,1): row 0 now has two 5s
        s.replace_range(1..2, "5");
        let grid = Grid::from_string(&s).unwrap();
        assert!(!is_valid(&grid));
    }

    #[test]
    fn test_is_valid_accepts_partial_grid() {
        let grid = row0_grid();
        assert!(is_valid(&grid));
    }
}
