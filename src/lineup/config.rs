//! Diversifier configuration.

use crate::brute_force::BruteForceConfig;
use crate::candidate::Player;
use crate::error::{LineupError, Result};
use crate::knapsack::KnapsackConfig;
use std::fmt;
use std::str::FromStr;

/// Which solver produces each round's lineup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolverMode {
    /// Multiple-choice knapsack DP.
    #[default]
    Knapsack,
    /// Exhaustive enumeration.
    BruteForce,
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolverMode::Knapsack => "knapsack",
            SolverMode::BruteForce => "brute_force",
        })
    }
}

impl FromStr for SolverMode {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "knapsack" => Ok(SolverMode::Knapsack),
            "brute_force" => Ok(SolverMode::BruteForce),
            other => Err(LineupError::Configuration(format!(
                "unknown solver mode: {other}, choose either knapsack or brute_force"
            ))),
        }
    }
}

/// Pre-filter applied to skaters when the pool is built.
///
/// Both bounds are strict: a skater is kept only if its value is greater
/// than `min_value` and its weight greater than `min_weight`. Goalies are
/// never filtered.
///
/// The default drops skaters projected at 1.0 or less or priced at 25 or
/// less. [`SkaterFilter::none`] keeps everyone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkaterFilter {
    pub min_value: Option<f64>,
    pub min_weight: Option<u32>,
}

impl Default for SkaterFilter {
    fn default() -> Self {
        Self {
            min_value: Some(1.0),
            min_weight: Some(25),
        }
    }
}

impl SkaterFilter {
    /// A filter that accepts every skater.
    pub fn none() -> Self {
        Self {
            min_value: None,
            min_weight: None,
        }
    }

    pub fn accepts(&self, player: &Player) -> bool {
        self.min_value.is_none_or(|min| player.value > min)
            && self.min_weight.is_none_or(|min| player.weight > min)
    }
}

/// Configuration for a diversified lineup batch.
///
/// # Examples
///
/// ```
/// use lineup_optimizer::lineup::{LineupConfig, SolverMode};
///
/// let config = LineupConfig::default()
///     .with_salary_cap(500)
///     .with_lineup_count(20)
///     .with_penalty(-0.25)
///     .with_solver("brute_force".parse().unwrap());
/// assert_eq!(config.solver, SolverMode::BruteForce);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineupConfig {
    /// Total salary budget per lineup.
    pub salary_cap: i64,

    /// Number of lineups to produce.
    pub lineup_count: usize,

    /// Value added to every player of a lineup after its round. Must be <= 0.
    pub penalty: f64,

    /// Solver used for each round.
    pub solver: SolverMode,

    /// Skater pre-filter.
    pub skater_filter: SkaterFilter,

    /// Upper bound on candidates per pair/triple group. 0 = no limit.
    pub max_group_candidates: usize,

    pub knapsack: KnapsackConfig,

    pub brute_force: BruteForceConfig,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self {
            salary_cap: 500,
            lineup_count: 15,
            penalty: -0.1,
            solver: SolverMode::default(),
            skater_filter: SkaterFilter::default(),
            max_group_candidates: 2_000_000,
            knapsack: KnapsackConfig::default(),
            brute_force: BruteForceConfig::default(),
        }
    }
}

impl LineupConfig {
    pub fn with_salary_cap(mut self, cap: i64) -> Self {
        self.salary_cap = cap;
        self
    }

    pub fn with_lineup_count(mut self, n: usize) -> Self {
        self.lineup_count = n;
        self
    }

    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn with_solver(mut self, solver: SolverMode) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_skater_filter(mut self, filter: SkaterFilter) -> Self {
        self.skater_filter = filter;
        self
    }

    pub fn with_max_group_candidates(mut self, n: usize) -> Self {
        self.max_group_candidates = n;
        self
    }

    pub fn with_knapsack(mut self, knapsack: KnapsackConfig) -> Self {
        self.knapsack = knapsack;
        self
    }

    pub fn with_brute_force(mut self, brute_force: BruteForceConfig) -> Self {
        self.brute_force = brute_force;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.salary_cap <= 0 {
            return Err(LineupError::Configuration(format!(
                "salary_cap must be positive, got {}",
                self.salary_cap
            )));
        }
        if self.lineup_count == 0 {
            return Err(LineupError::Configuration(
                "lineup_count must be positive".into(),
            ));
        }
        if !self.penalty.is_finite() || self.penalty > 0.0 {
            return Err(LineupError::Configuration(format!(
                "penalty must be finite and <= 0, got {}",
                self.penalty
            )));
        }
        if self.skater_filter.min_value.is_some_and(|v| !v.is_finite()) {
            return Err(LineupError::Configuration(
                "skater_filter.min_value must be finite".into(),
            ));
        }
        if self.solver == SolverMode::Knapsack {
            self.knapsack.check_table(self.salary_cap.unsigned_abs())?;
        }
        self.brute_force.validate()
    }
}
