use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Carve-budget exhaustion is deliberately not an error: the carver
/// returns the best-effort removal count and the host decides whether to
/// accept it or regenerate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Attempt to edit a fixed clue cell. Recoverable; no state change.
    #[error("cell ({row}, {col}) is a clue and cannot be edited")]
    IllegalEdit { row: usize, col: usize },

    /// A move value outside 0-9 (0 erases).
    #[error("value {value} is out of range, expected 0-9")]
    ValueOutOfRange { value: u8 },

    /// A freshly diagonal-seeded grid failed to solve. The diagonal
    /// blocks are mutually constraint-independent, so this cannot happen
    /// unless the solver or the seeding is defective; generation aborts
    /// rather than retrying.
    #[error("generation invariant violated: seeded grid has no completion")]
    GenerationInvariant,

    /// A puzzle string that does not describe 81 cells of 0-9 / '.'.
    #[error("malformed puzzle: {0}")]
    MalformedPuzzle(String),

    /// A host-supplied puzzle with no completion.
    #[error("puzzle has no solution")]
    UnsolvablePuzzle,

    /// A host-supplied puzzle with more than one completion.
    #[error("puzzle does not have a unique solution")]
    AmbiguousPuzzle,
}
