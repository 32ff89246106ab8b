//! Exhaustive lineup enumeration.
//!
//! Evaluates every goalie / centre pair / defense pair / wing triple tuple.
//! The working set is sorted and cut back to the best few lineups at a
//! fixed interval so memory stays bounded however many tuples are checked.
//! Serves as a correctness oracle for the knapsack solver on small inputs,
//! and as a fallback when groups may share players.

mod config;
mod runner;

pub use config::BruteForceConfig;
pub use runner::{BruteForceResult, BruteForceSolver};
