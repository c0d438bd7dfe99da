//! Sudoku engine: puzzle generation with a uniqueness guarantee,
//! exhaustive solving, and the per-attempt game session.
//!
//! The layering is leaves-first:
//!
//! - [`rules`] is the single constraint primitive (is this digit legal
//!   here?); every other component composes it.
//! - [`Solver`] is exhaustive backtracking: completes a grid or proves
//!   none exists, and counts completions up to a bound, which doubles as
//!   the uniqueness oracle.
//! - [`Generator`] seeds the three independent diagonal blocks randomly,
//!   solves the rest, then carves cells out while the oracle keeps
//!   proving the remaining puzzle has exactly one completion.
//! - [`Session`] owns one {working grid, clue mask, solution} triple and
//!   exposes moves, hints, candidate queries, and completion detection.
//!
//! Generation is CPU-bound; hosts with an interactive thread should run
//! [`Session::new`] on a worker and take delivery of the finished
//! session whole. No partial generation state is ever observable.
//!
//! ```no_run
//! use sudoku_engine::{Difficulty, Session};
//!
//! let mut session = Session::new(Difficulty::Medium)?;
//! if let Some(hint) = session.hint() {
//!     session.apply_move(hint.pos, hint.value)?;
//! }
//! assert!(!session.is_complete());
//! # Ok::<(), sudoku_engine::EngineError>(())
//! ```

mod bitset;
mod error;
mod generator;
mod grid;
pub mod rules;
mod session;
mod solver;

pub use bitset::DigitSet;
pub use error::EngineError;
pub use generator::{Carved, Difficulty, GeneratedPuzzle, Generator};
pub use grid::{Cell, Grid, Position};
pub use session::{Hint, Session, SessionState};
pub use solver::Solver;
