//! Brute-force solver configuration.

use crate::error::{LineupError, Result};

/// Configuration for exhaustive lineup enumeration.
///
/// # Examples
///
/// ```
/// use lineup_optimizer::brute_force::BruteForceConfig;
///
/// let config = BruteForceConfig::default()
///     .with_keep_top(5)
///     .with_max_evaluations(1_000_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BruteForceConfig {
    /// Evaluated tuples between working-set prunes.
    pub prune_interval: u64,

    /// Lineups kept after each prune and in the final result.
    pub keep_top: usize,

    /// Hard cap on evaluated tuples. 0 = no limit.
    pub max_evaluations: u64,

    /// Evaluated tuples between progress log lines. 0 = silent.
    pub progress_interval: u64,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self {
            prune_interval: 10_000,
            keep_top: 10,
            max_evaluations: 0,
            progress_interval: 10_000_000,
        }
    }
}

impl BruteForceConfig {
    pub fn with_prune_interval(mut self, n: u64) -> Self {
        self.prune_interval = n;
        self
    }

    pub fn with_keep_top(mut self, n: usize) -> Self {
        self.keep_top = n;
        self
    }

    pub fn with_max_evaluations(mut self, n: u64) -> Self {
        self.max_evaluations = n;
        self
    }

    pub fn with_progress_interval(mut self, n: u64) -> Self {
        self.progress_interval = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.prune_interval == 0 {
            return Err(LineupError::Configuration(
                "prune_interval must be positive".into(),
            ));
        }
        if self.keep_top == 0 {
            return Err(LineupError::Configuration("keep_top must be positive".into()));
        }
        Ok(())
    }
}
