//! Puzzle generation: a randomized solved grid, then carving under the
//! uniqueness oracle.

use crate::error::EngineError;
use crate::grid::{Grid, Position};
use crate::solver::Solver;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Difficulty tier, mapping to a target number of carved cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// How many cells the carver tries to remove at this tier.
    pub fn target_removals(&self) -> usize {
        match self {
            Difficulty::Easy => 35,
            Difficulty::Medium => 45,
            Difficulty::Hard => 55,
            Difficulty::Expert => 65,
        }
    }

    pub fn all_levels() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
        ]
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::Expert => write!(f, "Expert"),
        }
    }
}

/// Result of one carving pass.
///
/// `removed < target` means the candidate pool ran out first and the
/// puzzle is best-effort at this fill level; the host decides whether to
/// accept it or regenerate.
#[derive(Debug, Clone)]
pub struct Carved {
    /// The carved puzzle; every still-filled cell is a clue.
    pub puzzle: Grid,
    pub removed: usize,
    pub target: usize,
}

impl Carved {
    pub fn reached_target(&self) -> bool {
        self.removed >= self.target
    }
}

/// A generated puzzle together with the solution it was carved from.
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub puzzle: Grid,
    pub solution: Grid,
    pub removed: usize,
    pub target: usize,
}

/// Puzzle generator. Owns its RNG so that a seeded generator replays the
/// same sequence of puzzles.
pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a puzzle at the given tier: fresh solved grid, then carve
    /// toward the tier's removal target.
    pub fn generate(&mut self, difficulty: Difficulty) -> Result<GeneratedPuzzle, EngineError> {
        let solution = self.fill_solved()?;
        let target = difficulty.target_removals();
        let carved = self.carve(&solution, target);
        debug!(
            "generated {} puzzle: {} of {} cells removed, {} clues",
            difficulty,
            carved.removed,
            target,
            carved.puzzle.given_count()
        );
        Ok(GeneratedPuzzle {
            puzzle: carved.puzzle,
            solution,
            removed: carved.removed,
            target,
        })
    }

    /// Produce a fully solved grid.
    ///
    /// The three diagonal blocks share no row, column, or block, so any
    /// random fill of them is mutually consistent; the solver completes
    /// the rest deterministically from that seed. A solver failure here
    /// is a logic defect and is surfaced, not retried.
    pub fn fill_solved(&mut self) -> Result<Grid, EngineError> {
        let mut grid = Grid::new();
        for origin in [0, 3, 6] {
            self.fill_block(&mut grid, origin, origin);
        }
        Solver::new()
            .solve(&grid)
            .ok_or(EngineError::GenerationInvariant)
    }

    /// Fill one 3x3 block with a random permutation of 1-9.
    fn fill_block(&mut self, grid: &mut Grid, start_row: usize, start_col: usize) {
        let mut values: Vec<u8> = (1..=9).collect();
        values.shuffle(&mut self.rng);

        let mut idx = 0;
        for row in start_row..start_row + 3 {
            for col in start_col..start_col + 3 {
                grid.set(Position::new(row, col), Some(values[idx]));
                idx += 1;
            }
        }
    }

    /// Carve cells out of `solution` until `target` are removed or the
    /// candidate pool is exhausted.
    ///
    /// Visits all 81 cells once, in random order. One visit per cell is a
    /// complete search: removing a clue can only add completions, so a
    /// cell whose removal broke uniqueness against a fuller grid would
    /// break it against any emptier one too. This bounds the pass at 81
    /// uniqueness checks and makes exhaustion explicit instead of an
    /// unbounded retry loop.
    pub fn carve(&mut self, solution: &Grid, target: usize) -> Carved {
        let mut working = solution.clone();
        let mut order: Vec<Position> = Position::all().collect();
        order.shuffle(&mut self.rng);

        let solver = Solver::new();
        let mut removed = 0;

        for pos in order {
            if removed == target {
                break;
            }
            let value = match working.get(pos) {
                Some(value) => value,
                None => continue,
            };

            working.set(pos, None);
            if solver.has_unique_solution(&working) {
                removed += 1;
            } else {
                working.set(pos, Some(value));
            }
        }

        if removed < target {
            warn!(
                "carve budget exhausted: removed {removed} of {target} cells, \
                 returning best-effort puzzle"
            );
        }

        // Remaining filled cells are exactly the clue mask
        let mut puzzle = Grid::new();
        for pos in Position::all() {
            if let Some(value) = working.get(pos) {
                puzzle.set_given(pos, value);
            }
        }

        Carved {
            puzzle,
            removed,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;

    #[test]
    fn test_fill_solved_is_valid_and_complete() {
        let mut generator = Generator::with_seed(42);
        let grid = generator.fill_solved().unwrap();
        assert!(grid.is_filled());
        assert!(rules::is_valid(&grid));
    }

    #[test]
    fn test_fill_solved_varies_with_seed() {
        let a = Generator::with_seed(1).fill_solved().unwrap();
        let b = Generator::with_seed(2).fill_solved().unwrap();
        assert_ne!(a.to_string_compact(), b.to_string_compact());
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = Generator::with_seed(42).generate(Difficulty::Easy).unwrap();
        let b = Generator::with_seed(42).generate(Difficulty::Easy).unwrap();
        assert_eq!(a.puzzle.to_string_compact(), b.puzzle.to_string_compact());
        assert_eq!(a.solution.to_string_compact(), b.solution.to_string_compact());
    }

    #[test]
    fn test_generated_puzzle_is_unique_and_consistent() {
        let mut generator = Generator::with_seed(42);
        let generated = generator.generate(Difficulty::Medium).unwrap();

        // Post-condition: the oracle holds on the carved output
        let solver = Solver::new();
        assert!(solver.has_unique_solution(&generated.puzzle));

        // Clues agree with the solution, and the mask accounts for every
        // removal
        for pos in Position::all() {
            match generated.puzzle.get(pos) {
                Some(v) => {
                    assert!(generated.puzzle.cell(pos).is_given());
                    assert_eq!(generated.solution.get(pos), Some(v));
                }
                None => assert!(!generated.puzzle.cell(pos).is_given()),
            }
        }
        assert_eq!(generated.puzzle.given_count(), 81 - generated.removed);

        // The solver rebuilds exactly the hidden solution
        let resolved = solver.solve(&generated.puzzle).unwrap();
        assert_eq!(
            resolved.to_string_compact(),
            generated.solution.to_string_compact()
        );
    }

    #[test]
    fn test_tier_targets_are_monotonic() {
        let targets: Vec<usize> = Difficulty::all_levels()
            .iter()
            .map(|d| d.target_removals())
            .collect();
        assert_eq!(targets, vec![35, 45, 55, 65]);
        assert!(targets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_carve_zero_target_is_trivially_unique() {
        let mut generator = Generator::with_seed(7);
        let solution = generator.fill_solved().unwrap();
        let carved = generator.carve(&solution, 0);
        assert_eq!(carved.removed, 0);
        assert!(carved.reached_target());
        assert!(carved.puzzle.is_filled());
        assert!(Solver::new().has_unique_solution(&carved.puzzle));
    }

    #[test]
    fn test_carve_single_cell_is_unique() {
        let mut generator = Generator::with_seed(7);
        let solution = generator.fill_solved().unwrap();
        let carved = generator.carve(&solution, 1);
        assert_eq!(carved.removed, 1);
        assert_eq!(carved.puzzle.empty_count(), 1);
        assert!(Solver::new().has_unique_solution(&carved.puzzle));
    }

    #[test]
    fn test_carve_exhaustion_is_best_effort() {
        // 81 removals is unreachable (a unique puzzle needs clues), so
        // the pass must stop at the pool's end and report the shortfall
        let mut generator = Generator::with_seed(7);
        let solution = generator.fill_solved().unwrap();
        let carved = generator.carve(&solution, 81);

        assert!(carved.removed < 81);
        assert!(!carved.reached_target());
        assert!(Solver::new().has_unique_solution(&carved.puzzle));
    }
}
