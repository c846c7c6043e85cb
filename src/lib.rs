//! Breadth-first and A* solvers for the 3x3 sliding-tile puzzle.

pub mod error;
pub mod frontier;
pub mod path;
pub mod puzzle;
pub mod search;
pub mod tree;

pub use error::{Error, Result};
pub use path::SolutionPath;
pub use puzzle::{Board, Move, State};
pub use search::{search, Algorithm, Outcome, SearchStats, Solution};
