//! Knapsack solver configuration.

use crate::error::{LineupError, Result};

/// How the chosen candidates are recovered from the filled DP table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reconstruction {
    /// Follow the candidate stored at each cell and subtract its weight.
    ///
    /// Always recovers the candidates that produced the optimal value.
    #[default]
    FollowChoice,

    /// Scan the residual budget downward for the first weight where the
    /// row value changes, and take the candidate stored there.
    ///
    /// Reproduces lineups produced by earlier releases. In flat regions of
    /// the table it can settle on a different candidate than the one that
    /// produced the optimum, and it fails when a row never changes value.
    ValueBreakpoint,
}

/// Rows in the DP table: row 0 plus one per position group.
const TABLE_ROWS: u128 = 5;

/// Configuration for the multiple-choice knapsack solver.
///
/// # Examples
///
/// ```
/// use lineup_optimizer::knapsack::{KnapsackConfig, Reconstruction};
///
/// let config = KnapsackConfig::default()
///     .with_reconstruction(Reconstruction::ValueBreakpoint)
///     .with_max_table_cells(100_000);
/// assert_eq!(config.reconstruction, Reconstruction::ValueBreakpoint);
/// assert!(config.check_table(500).is_ok());
/// assert!(config.check_table(1_000_000).is_err());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackConfig {
    /// Table walk used after the fill.
    pub reconstruction: Reconstruction,

    /// Upper bound on DP table cells, `5 * (budget + 1)`. 0 = no limit.
    pub max_table_cells: u64,
}

impl Default for KnapsackConfig {
    fn default() -> Self {
        Self {
            reconstruction: Reconstruction::default(),
            max_table_cells: 10_000_000,
        }
    }
}

impl KnapsackConfig {
    pub fn with_reconstruction(mut self, reconstruction: Reconstruction) -> Self {
        self.reconstruction = reconstruction;
        self
    }

    pub fn with_max_table_cells(mut self, n: u64) -> Self {
        self.max_table_cells = n;
        self
    }

    /// Fails with [`LineupError::Configuration`] when the table for `budget`
    /// would exceed `max_table_cells` or cannot be addressed at all.
    pub fn check_table(&self, budget: u64) -> Result<()> {
        let cells = TABLE_ROWS * (u128::from(budget) + 1);
        if self.max_table_cells > 0 && cells > u128::from(self.max_table_cells) {
            return Err(LineupError::Configuration(format!(
                "knapsack table for budget {budget} needs {cells} cells, max_table_cells is {}",
                self.max_table_cells
            )));
        }
        let per_row = budget.saturating_add(1);
        let addressable = usize::try_from(per_row).is_ok_and(|n| n <= isize::MAX as usize / 16);
        if !addressable {
            return Err(LineupError::Configuration(format!(
                "knapsack budget {budget} is too large to allocate"
            )));
        }
        Ok(())
    }
}
