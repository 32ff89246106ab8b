//! Multiple-choice knapsack solver.
//!
//! Chooses exactly one candidate from each position group (goalie, centre
//! pair, wing triple, defense pair) to maximize total projected value under
//! a shared salary budget. The util player is fixed beforehand and its
//! weight comes off the budget first.
//!
//! The DP is exact when groups do not share players. A player reused across
//! groups is caught when the [`Lineup`](crate::lineup::Lineup) is built and
//! reported as [`LineupError::DuplicatePlayer`](crate::LineupError::DuplicatePlayer).
//!
//! # References
//!
//! - Sinha & Zoltners (1979), "The Multiple-Choice Knapsack Problem"
//! - Kellerer, Pferschy & Pisinger (2004), "Knapsack Problems", ch. 11

mod config;
mod runner;

pub use config::{KnapsackConfig, Reconstruction};
pub use runner::KnapsackSolver;
