//! DP fill and reconstruction.
//!
//! # Algorithm
//!
//! 1. Reduce the budget by the util's weight: `limit' = limit - util.weight`.
//! 2. Fill `table[i][w]`, the best value using exactly one candidate from
//!    each of the first `i` groups with total weight at most `w`. Row 0 is
//!    all zeros; unreachable cells hold negative infinity.
//! 3. For each cell, scan the group's candidates in order and keep one only
//!    if it is strictly better than the best seen so far, so the first
//!    maximizing candidate wins ties. The winner's index goes into a
//!    parallel choice table.
//! 4. Walk the rows from last to first to recover one candidate per group.
//!
//! # Reference
//!
//! Sinha & Zoltners (1979), "The Multiple-Choice Knapsack Problem",
//! *Operations Research* 27(3), 503-515.

use super::config::{KnapsackConfig, Reconstruction};
use crate::candidate::{Candidate, PositionGroup, PositionGroups};
use crate::error::{LineupError, Result};
use crate::lineup::Lineup;
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const GROUPS: usize = 4;

/// Filled value and choice tables, `GROUPS + 1` rows of `budget + 1` cells.
struct DpTable {
    values: Vec<Vec<f64>>,
    choices: Vec<Vec<Option<usize>>>,
}

/// Multiple-choice knapsack over the goalie, centre, wing, and defense groups.
pub struct KnapsackSolver;

impl KnapsackSolver {
    /// Picks one candidate per group, plus `util`, maximizing total value
    /// with total weight at most `limit`.
    pub fn solve(
        groups: &PositionGroups,
        util: &Candidate,
        limit: i64,
        config: &KnapsackConfig,
    ) -> Result<Lineup> {
        if limit <= 0 {
            return Err(LineupError::Configuration(format!(
                "salary cap must be positive, got {limit}"
            )));
        }
        let cap = limit.unsigned_abs();
        if util.weight > cap {
            return Err(LineupError::Configuration(format!(
                "util weight {} exceeds salary cap {limit}",
                util.weight
            )));
        }
        let budget = cap - util.weight;
        let ordered = groups.in_order();
        for group in ordered {
            group.ensure_non_empty()?;
        }
        debug!("knapsack budget after util {:?}: {budget}", util.ids());

        config.check_table(budget)?;
        let budget = usize::try_from(budget)
            .map_err(|_| LineupError::Configuration(format!("budget {budget} too large")))?;
        let table = fill(&ordered, budget);

        let best = table.values[GROUPS][budget];
        if best == f64::NEG_INFINITY {
            return Err(LineupError::Infeasible { limit });
        }

        let picks = match config.reconstruction {
            Reconstruction::FollowChoice => follow_choice(&table, &ordered, budget)?,
            Reconstruction::ValueBreakpoint => value_breakpoint(&table, &ordered, budget)?,
        };
        debug!("knapsack optimum {best:.3} with picks {picks:?}");

        let [g, c, w, d] = picks;
        Lineup::new(
            ordered[0].candidates()[g].clone(),
            ordered[1].candidates()[c].clone(),
            ordered[2].candidates()[w].clone(),
            ordered[3].candidates()[d].clone(),
            util.clone(),
            limit,
        )
    }
}

fn fill(groups: &[&PositionGroup; GROUPS], budget: usize) -> DpTable {
    let mut values = Vec::with_capacity(GROUPS + 1);
    let mut choices = Vec::with_capacity(GROUPS + 1);
    values.push(vec![0.0; budget + 1]);
    choices.push(vec![None; budget + 1]);

    for (i, group) in groups.iter().enumerate() {
        debug!(
            "knapsack row {}: {} {} candidates",
            i + 1,
            group.len(),
            group.position()
        );
        let (row, choice) = fill_row(&values[i], group.candidates(), budget);
        values.push(row);
        choices.push(choice);
    }

    DpTable { values, choices }
}

#[cfg(not(feature = "parallel"))]
fn fill_row(
    prev: &[f64],
    candidates: &[Candidate],
    budget: usize,
) -> (Vec<f64>, Vec<Option<usize>>) {
    (0..=budget).map(|w| best_cell(prev, candidates, w)).unzip()
}

#[cfg(feature = "parallel")]
fn fill_row(
    prev: &[f64],
    candidates: &[Candidate],
    budget: usize,
) -> (Vec<f64>, Vec<Option<usize>>) {
    (0..=budget)
        .into_par_iter()
        .map(|w| best_cell(prev, candidates, w))
        .unzip()
}

/// Best value at weight `w` and the index of the candidate that reached it.
fn best_cell(prev: &[f64], candidates: &[Candidate], w: usize) -> (f64, Option<usize>) {
    let mut best = f64::NEG_INFINITY;
    let mut choice = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        if candidate.weight > w as u64 {
            continue;
        }
        let value = prev[w - candidate.weight as usize] + candidate.value;
        if value > best {
            best = value;
            choice = Some(idx);
        }
    }
    (best, choice)
}

fn follow_choice(
    table: &DpTable,
    groups: &[&PositionGroup; GROUPS],
    budget: usize,
) -> Result<[usize; GROUPS]> {
    let mut picks = [0; GROUPS];
    let mut w = budget;
    for i in (1..=GROUPS).rev() {
        let idx = table.choices[i][w].ok_or_else(|| {
            LineupError::Reconstruction(format!("no choice stored at row {i}, weight {w}"))
        })?;
        picks[i - 1] = idx;
        w -= groups[i - 1].candidates()[idx].weight as usize;
    }
    Ok(picks)
}

fn value_breakpoint(
    table: &DpTable,
    groups: &[&PositionGroup; GROUPS],
    budget: usize,
) -> Result<[usize; GROUPS]> {
    let mut picks = [0; GROUPS];
    let mut w = budget;
    for i in (1..=GROUPS).rev() {
        let row = &table.values[i];
        let j = (1..=w)
            .rev()
            .find(|&j| row[j - 1] != row[j])
            .ok_or_else(|| {
                LineupError::Reconstruction(format!(
                    "row {i} has no value change at or below weight {w}"
                ))
            })?;
        let idx = table.choices[i][j].ok_or_else(|| {
            LineupError::Reconstruction(format!("no choice stored at row {i}, weight {j}"))
        })?;
        let weight = groups[i - 1].candidates()[idx].weight;
        w = usize::try_from(weight)
            .ok()
            .and_then(|weight| w.checked_sub(weight))
            .ok_or_else(|| {
                LineupError::Reconstruction(format!(
                    "candidate weight {weight} exceeds residual budget {w}"
                ))
            })?;
        picks[i - 1] = idx;
    }
    Ok(picks)
}
