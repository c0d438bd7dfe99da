//! Basic walkthrough of the engine: generate, inspect, play, solve.

use sudoku_engine::{Difficulty, Generator, Grid, Session, Solver};

fn main() -> Result<(), sudoku_engine::EngineError> {
    println!("Generating a Medium puzzle...\n");
    let mut generator = Generator::new();
    let generated = generator.generate(Difficulty::Medium)?;

    println!("{}", generated.puzzle);
    println!(
        "Clues: {}  removed: {} of {}",
        generated.puzzle.given_count(),
        generated.removed,
        generated.target
    );

    let solver = Solver::new();
    println!(
        "Unique solution: {}\n",
        solver.has_unique_solution(&generated.puzzle)
    );

    // Play a session against a known puzzle string
    let puzzle = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    let mut session = Session::from_puzzle(puzzle)?;
    println!("Loaded puzzle:\n{}", session.grid());

    if let Some(hint) = session.hint() {
        println!(
            "Hint: ({}, {}) = {}",
            hint.pos.row, hint.pos.col, hint.value
        );
        session.apply_move(hint.pos, hint.value)?;
    }

    let counts = session.remaining_counts();
    println!("Remaining placements per digit: {counts:?}");

    // And solve it outright
    let grid = Grid::from_string(puzzle)?;
    if let Some(solution) = solver.solve(&grid) {
        println!("\nSolution:\n{solution}");
    }

    Ok(())
}
