mod board;
mod generator;
mod solver;

pub use board::Board;
pub use generator::{generate, generate_solved, generate_solved_with_rng, generate_with_rng};
pub use solver::{complete, SolverError};
