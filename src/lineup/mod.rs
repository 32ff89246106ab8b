//! Lineup record and the diversification loop.
//!
//! [`LineupDiversifier`] runs the solver repeatedly against a [`PlayerPool`],
//! lowering the value of every selected player after each round so later
//! rounds favor different players without forbidding reuse.

mod config;
mod pool;
mod runner;
mod types;

pub use config::{LineupConfig, SkaterFilter, SolverMode};
pub use pool::PlayerPool;
pub use runner::{DiversifyResult, LineupDiversifier, RoundSummary};
pub use types::{Lineup, LINEUP_SIZE, SLOT_LABELS};
