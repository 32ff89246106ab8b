//! Exhaustive enumeration with a bounded working set.

use super::config::BruteForceConfig;
use crate::candidate::{Candidate, PositionGroups};
use crate::error::{LineupError, Result};
use crate::lineup::Lineup;
use log::{debug, info, warn};

/// Result of a brute-force run.
#[derive(Debug, Clone)]
pub struct BruteForceResult {
    /// Best lineups found, highest total value first.
    pub lineups: Vec<Lineup>,

    /// Number of tuples evaluated.
    pub evaluated: u64,

    /// Number of tuples within the cap and free of duplicate players.
    pub feasible: u64,

    /// Whether enumeration stopped at `max_evaluations`.
    pub budget_exhausted: bool,
}

/// Evaluates every (goalie, centre pair, defense pair, wing triple) tuple.
pub struct BruteForceSolver;

impl BruteForceSolver {
    /// Enumerates all tuples and keeps the best `keep_top` lineups whose
    /// total weight, util included, is at most `limit`.
    ///
    /// Tuples that repeat a player across slots are skipped.
    pub fn solve(
        groups: &PositionGroups,
        util: &Candidate,
        limit: i64,
        config: &BruteForceConfig,
    ) -> Result<BruteForceResult> {
        config.validate()?;
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
        for group in groups.in_order() {
            group.ensure_non_empty()?;
        }

        let goalies = groups.goalies.candidates();
        let centres = groups.centres.candidates();
        let defense = groups.defense.candidates();
        let wingers = groups.wingers.candidates();
        info!(
            "brute force over {} combinations",
            goalies.len() as u128
                * centres.len() as u128
                * defense.len() as u128
                * wingers.len() as u128
        );

        let mut lineups: Vec<Lineup> = Vec::new();
        let mut evaluated = 0u64;
        let mut feasible = 0u64;
        let mut budget_exhausted = false;

        'enumerate: for g in goalies {
            for c in centres {
                for d in defense {
                    for w in wingers {
                        if config.max_evaluations > 0 && evaluated >= config.max_evaluations {
                            budget_exhausted = true;
                            break 'enumerate;
                        }
                        evaluated += 1;

                        if evaluated % config.prune_interval == 0 {
                            keep_best(&mut lineups, config.keep_top);
                        }
                        if config.progress_interval > 0 && evaluated % config.progress_interval == 0
                        {
                            info!(
                                "{evaluated} combinations checked, top value {:?}",
                                lineups.first().map(Lineup::total_value)
                            );
                        }

                        let weight = [g, c, d, w, util]
                            .iter()
                            .map(|x| u128::from(x.weight))
                            .sum::<u128>();
                        if weight > u128::from(cap) {
                            continue;
                        }
                        match Lineup::new(
                            g.clone(),
                            c.clone(),
                            w.clone(),
                            d.clone(),
                            util.clone(),
                            limit,
                        ) {
                            Ok(lineup) => {
                                feasible += 1;
                                lineups.push(lineup);
                            }
                            Err(LineupError::DuplicatePlayer { .. }) => {}
                            Err(e) => return Err(e),
                        }
                    }
                }
            }
        }

        if budget_exhausted {
            warn!("brute force stopped after {evaluated} combinations (evaluation budget)");
        }
        keep_best(&mut lineups, config.keep_top);
        debug!("brute force checked {evaluated} combinations, {feasible} feasible");

        Ok(BruteForceResult {
            lineups,
            evaluated,
            feasible,
            budget_exhausted,
        })
    }
}

/// Sorts by total value, highest first, and drops everything past `keep`.
fn keep_best(lineups: &mut Vec<Lineup>, keep: usize) {
    lineups.sort_by(|a, b| b.total_value().total_cmp(&a.total_value()));
    lineups.truncate(keep);
}
