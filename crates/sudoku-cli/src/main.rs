//! Thin command-line host around `sudoku-engine`.
//!
//! Generation is CPU-bound, so `new` runs it on a worker thread and
//! receives the finished session over a channel, the delivery pattern an
//! interactive host would use.

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::sync::mpsc;
use std::thread;
use sudoku_engine::{Difficulty, Grid, Session, Solver};

#[derive(Parser)]
#[command(name = "sudoku", version, about = "Generate and solve Sudoku puzzles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new puzzle
    New {
        /// Difficulty tier
        #[arg(long, value_enum, default_value_t = Tier::Medium)]
        tier: Tier,
        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Print the session snapshot as JSON instead of a board
        #[arg(long)]
        json: bool,
        /// Also print the solution
        #[arg(long)]
        solution: bool,
    },
    /// Solve an 81-character puzzle string (0 or . for empty cells)
    Solve {
        puzzle: String,
    },
    /// Report whether a puzzle string is unsolvable, unique, or ambiguous
    Check {
        puzzle: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Tier {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl From<Tier> for Difficulty {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Easy => Difficulty::Easy,
            Tier::Medium => Difficulty::Medium,
            Tier::Hard => Difficulty::Hard,
            Tier::Expert => Difficulty::Expert,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::New {
            tier,
            seed,
            json,
            solution,
        } => {
            let difficulty: Difficulty = tier.into();

            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                let session = match seed {
                    Some(seed) => Session::with_seed(difficulty, seed),
                    None => Session::new(difficulty),
                };
                // Receiver hung up means nobody wants the result anymore
                let _ = tx.send(session);
            });
            let session = rx.recv()??;

            info!(
                "generated {} puzzle with {} clues",
                session.difficulty(),
                session.grid().given_count()
            );
            if session.removed() < session.target() {
                eprintln!(
                    "note: carved {} of {} cells, best-effort puzzle",
                    session.removed(),
                    session.target()
                );
            }

            let state = session.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                print!("{}", session.grid());
                println!("\n{}", state.puzzle);
                if solution {
                    println!("\nSolution:");
                    print!("{}", Grid::from_string(&state.solution)?);
                }
            }
        }

        Command::Solve { puzzle } => {
            let grid = Grid::from_string(&puzzle)?;
            match Solver::new().solve(&grid) {
                Some(solution) => {
                    print!("{solution}");
                    println!("\n{}", solution.to_string_compact());
                }
                None => {
                    eprintln!("no solution exists");
                    std::process::exit(2);
                }
            }
        }

        Command::Check { puzzle } => {
            let grid = Grid::from_string(&puzzle)?;
            match Solver::new().count_solutions(&grid, 2) {
                0 => println!("unsolvable"),
                1 => println!("unique"),
                _ => println!("ambiguous"),
            }
        }
    }

    Ok(())
}
