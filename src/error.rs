//! Error types shared by every stage of lineup optimization.

use crate::candidate::{PlayerId, Position};
use thiserror::Error;

/// The pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Input or configuration validation, before any work is done.
    Configuration,
    /// Candidate (pair/triple) generation.
    Generation,
    /// DP table fill or exhaustive enumeration.
    Solve,
    /// Walking the DP table back to the chosen candidates.
    Reconstruction,
    /// Lineup invariant checks.
    Validation,
}

/// Errors produced while building lineups.
///
/// Every variant aborts the whole batch. Nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineupError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("not enough {position} players: {available} available, {required} required")]
    InsufficientCandidates {
        position: Position,
        available: usize,
        required: usize,
    },

    #[error("no starting goalie is eligible")]
    NoStartingGoalie,

    #[error("{position} group would hold {combinations} candidates, budget is {budget}")]
    EnumerationBudget {
        position: Position,
        combinations: u128,
        budget: usize,
    },

    #[error("no combination fits within a budget of {limit}")]
    Infeasible { limit: i64 },

    #[error("reconstruction failed: {0}")]
    Reconstruction(String),

    #[error("player {id} appears in more than one slot")]
    DuplicatePlayer { id: PlayerId },

    #[error("lineup weight {total_weight} exceeds cap {cap}")]
    OverCap { total_weight: u64, cap: i64 },

    #[error("cancelled after {completed} lineups")]
    Cancelled { completed: usize },
}

impl LineupError {
    /// Returns the stage this error was raised in.
    pub fn stage(&self) -> Stage {
        match self {
            LineupError::Configuration(_) | LineupError::NoStartingGoalie => Stage::Configuration,
            LineupError::InsufficientCandidates { .. } | LineupError::EnumerationBudget { .. } => {
                Stage::Generation
            }
            LineupError::Infeasible { .. } | LineupError::Cancelled { .. } => Stage::Solve,
            LineupError::Reconstruction(_) => Stage::Reconstruction,
            LineupError::DuplicatePlayer { .. } | LineupError::OverCap { .. } => Stage::Validation,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LineupError>;
