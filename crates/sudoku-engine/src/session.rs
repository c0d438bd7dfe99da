//! One puzzle attempt: the working grid, the clue mask, and the hidden
//! solution, plus the move/hint/completion surface the host consumes.

use crate::bitset::DigitSet;
use crate::error::EngineError;
use crate::generator::{Difficulty, GeneratedPuzzle, Generator};
use crate::grid::{Grid, Position};
use crate::rules;
use crate::solver::Solver;
use log::debug;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// A hint: the solution's value for one currently empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub pos: Position,
    pub value: u8,
}

/// Serializable session snapshot. Persistence itself is the host's
/// business; this is the shape it stores and hands back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Clues only, 81-character compact form.
    pub puzzle: String,
    /// The full working grid, clues included.
    pub working: String,
    pub solution: String,
    pub difficulty: Difficulty,
    pub removed: usize,
    pub target: usize,
    pub hints_used: usize,
    pub moves: usize,
}

/// One puzzle attempt.
///
/// Owns its grids exclusively; the solution is never exposed whole, only
/// one cell at a time through [`Session::hint`] and
/// [`Session::matches_solution`].
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    solution: Grid,
    difficulty: Difficulty,
    removed: usize,
    target: usize,
    hints_used: usize,
    moves: usize,
}

impl Session {
    /// Generate a fresh puzzle at the given tier and start a session on
    /// it. A carve shortfall is accepted as best-effort; the host can
    /// compare [`Session::removed`] against [`Session::target`].
    pub fn new(difficulty: Difficulty) -> Result<Self, EngineError> {
        Self::install(Generator::new().generate(difficulty)?, difficulty)
    }

    /// Reproducible session for tests and replays.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Result<Self, EngineError> {
        Self::install(Generator::with_seed(seed).generate(difficulty)?, difficulty)
    }

    fn install(generated: GeneratedPuzzle, difficulty: Difficulty) -> Result<Self, EngineError> {
        debug!(
            "starting {} session with {} clues",
            difficulty,
            generated.puzzle.given_count()
        );
        Ok(Self {
            grid: generated.puzzle,
            solution: generated.solution,
            difficulty,
            removed: generated.removed,
            target: generated.target,
            hints_used: 0,
            moves: 0,
        })
    }

    /// Start a session on a host-supplied puzzle string. The puzzle must
    /// have exactly one completion.
    pub fn from_puzzle(s: &str) -> Result<Self, EngineError> {
        let grid = Grid::from_string(s)?;
        let solver = Solver::new();
        match solver.count_solutions(&grid, 2) {
            0 => return Err(EngineError::UnsolvablePuzzle),
            1 => {}
            _ => return Err(EngineError::AmbiguousPuzzle),
        }
        // Uniqueness was just proven, so this cannot fail
        let solution = solver.solve(&grid).ok_or(EngineError::UnsolvablePuzzle)?;

        let removed = grid.empty_count();
        Ok(Self {
            grid,
            solution,
            difficulty: Difficulty::for_removals(removed),
            removed,
            target: removed,
            hints_used: 0,
            moves: 0,
        })
    }

    /// The working grid, clue flags included.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Cells actually carved out of the solution.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// The tier's removal target (equals `removed` unless the carver ran
    /// out of candidates).
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    /// Successful `apply_move` calls since the last restart.
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_clue(&self, pos: Position) -> bool {
        self.grid.cell(pos).is_given()
    }

    /// Write `value` into the working grid; `0` erases.
    ///
    /// Only the clue-immutability invariant is enforced here. Whether the
    /// digit matches the hidden solution is domain data
    /// ([`Session::matches_solution`]), not an error: the host owns
    /// scoring and feedback policy.
    pub fn apply_move(&mut self, pos: Position, value: u8) -> Result<(), EngineError> {
        if value > 9 {
            return Err(EngineError::ValueOutOfRange { value });
        }
        if self.is_clue(pos) {
            return Err(EngineError::IllegalEdit {
                row: pos.row,
                col: pos.col,
            });
        }

        self.grid.set(pos, if value == 0 { None } else { Some(value) });
        self.moves += 1;
        Ok(())
    }

    /// Does the working value at `pos` equal the solution's? `None` for
    /// an empty cell.
    pub fn matches_solution(&self, pos: Position) -> Option<bool> {
        self.grid.get(pos).map(|v| self.solution.get(pos) == Some(v))
    }

    /// Every cell filled and every unit constraint satisfied. Full
    /// revalidation each call, so out-of-band state can never drift past
    /// it.
    pub fn is_complete(&self) -> bool {
        self.grid.is_filled() && rules::is_valid(&self.grid)
    }

    /// Reveal the solution's value for a uniformly random empty cell.
    ///
    /// The working grid is untouched; applying the hint is the caller's
    /// decision.
    pub fn hint(&mut self) -> Option<Hint> {
        let empty = self.grid.empty_positions();
        let pos = *empty.choose(&mut rand::thread_rng())?;
        let value = self.solution.get(pos)?;
        self.hints_used += 1;
        Some(Hint { pos, value })
    }

    /// For each digit 1-9, how many placements remain before it is
    /// exhausted (`9 - occurrences`, floored at 0).
    pub fn remaining_counts(&self) -> [u8; 9] {
        let mut placed = [0u8; 9];
        for pos in Position::all() {
            if let Some(v) = self.grid.get(pos) {
                placed[(v - 1) as usize] += 1;
            }
        }
        placed.map(|n| 9u8.saturating_sub(n))
    }

    /// Digits legally placeable at `pos` given the working grid.
    pub fn candidates(&self, pos: Position) -> DigitSet {
        rules::legal_digits(&self.grid, pos)
    }

    /// Revert the working grid to the original clues. The solution and
    /// the clue mask are unchanged; consumed hints stay consumed.
    pub fn restart(&mut self) -> &Grid {
        for pos in Position::all() {
            if !self.is_clue(pos) {
                self.grid.set(pos, None);
            }
        }
        self.moves = 0;
        &self.grid
    }

    /// Snapshot for host-side persistence.
    pub fn snapshot(&self) -> SessionState {
        let mut clues = Grid::new();
        for pos in Position::all() {
            if self.is_clue(pos) {
                if let Some(v) = self.grid.get(pos) {
                    clues.set_given(pos, v);
                }
            }
        }
        SessionState {
            puzzle: clues.to_string_compact(),
            working: self.grid.to_string_compact(),
            solution: self.solution.to_string_compact(),
            difficulty: self.difficulty,
            removed: self.removed,
            target: self.target,
            hints_used: self.hints_used,
            moves: self.moves,
        }
    }

    /// Rebuild a session from a snapshot.
    pub fn restore(state: SessionState) -> Result<Self, EngineError> {
        let clues = Grid::from_string(&state.puzzle)?;
        let working_values = Grid::from_string(&state.working)?;
        let solution = Grid::from_string(&state.solution)?;

        if !solution.is_filled() || !rules::is_valid(&solution) {
            return Err(EngineError::MalformedPuzzle(
                "snapshot solution is not a valid completion".into(),
            ));
        }

        // Clues must agree with the solution, and working values overlay
        // the non-clue cells only
        let mut grid = clues.clone();
        for pos in Position::all() {
            match clues.get(pos) {
                Some(v) => {
                    if solution.get(pos) != Some(v) {
                        return Err(EngineError::MalformedPuzzle(
                            "snapshot clues disagree with solution".into(),
                        ));
                    }
                }
                None => grid.set(pos, working_values.get(pos)),
            }
        }

        Ok(Self {
            grid,
            solution,
            difficulty: state.difficulty,
            removed: state.removed,
            target: state.target,
            hints_used: state.hints_used,
            moves: state.moves,
        })
    }
}

impl Difficulty {
    /// Classify a puzzle by its removal count: the smallest tier whose
    /// target covers it.
    pub fn for_removals(removed: usize) -> Difficulty {
        *Difficulty::all_levels()
            .iter()
            .find(|d| removed <= d.target_removals())
            .unwrap_or(&Difficulty::Expert)
    }
}
