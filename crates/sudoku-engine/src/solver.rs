//! Exhaustive backtracking search.

use crate::grid::Grid;
use crate::rules;

/// Stateless solver; all state is per-call.
#[derive(Debug, Default)]
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Solve the puzzle, returning the completed grid if one exists.
    pub fn solve(&self, grid: &Grid) -> Option<Grid> {
        let mut working = grid.clone();
        if solve_in_place(&mut working) {
            Some(working)
        } else {
            None
        }
    }

    /// Count completions of `grid`, stopping once `limit` are found.
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> usize {
        let mut working = grid.clone();
        let mut count = 0;
        count_recursive(&mut working, &mut count, limit);
        count
    }

    /// The uniqueness oracle: does exactly one completion exist?
    ///
    /// An unsolvable grid is reported as not unique, the conservative
    /// failure signal the carver relies on.
    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        self.count_solutions(grid, 2) == 1
    }
}

/// Depth-first search over the first empty cell in row-major order,
/// trying digits 1-9 ascending. On success the grid is left complete; on
/// failure every attempted digit has been rolled back and the grid is
/// unchanged.
fn solve_in_place(grid: &mut Grid) -> bool {
    let pos = match grid.first_empty() {
        Some(pos) => pos,
        None => return true,
    };

    for value in 1..=9 {
        if rules::is_legal(grid, pos, value) {
            grid.set(pos, Some(value));
            if solve_in_place(grid) {
                return true;
            }
            grid.set(pos, None);
        }
    }

    false
}

/// Same search shape as [`solve_in_place`], but keeps going after a
/// completion until `limit` completions are counted.
fn count_recursive(grid: &mut Grid, count: &mut usize, limit: usize) {
    if *count >= limit {
        return;
    }

    let pos = match grid.first_empty() {
        Some(pos) => pos,
        None => {
            *count += 1;
            return;
        }
    };

    for value in 1..=9 {
        if rules::is_legal(grid, pos, value) {
            grid.set(pos, Some(value));
            count_recursive(grid, count, limit);
            grid.set(pos, None);
            if *count >= limit {
                return;
            }
        }
    }
}
