//! Diversification loop.
//!
//! # Algorithm
//!
//! For each of `lineup_count` rounds:
//!
//! 1. The highest-value skater becomes the util and sits out of the
//!    skater pool for this round.
//! 2. Position groups are built from the remaining skaters and the goalies,
//!    and the configured solver picks the round's lineup.
//! 3. Every player in the lineup, util and goalie included, has the penalty
//!    added to its value in the shared pool.
//!
//! Rounds are strictly sequential: round `i + 1` sees the values lowered by
//! round `i`. Lineups are returned ranked by total value.

use super::config::{LineupConfig, SolverMode};
use super::pool::PlayerPool;
use super::types::Lineup;
use crate::brute_force::BruteForceSolver;
use crate::candidate::{build_position_groups, Candidate, Player, PlayerId, Position};
use crate::error::{LineupError, Result};
use crate::knapsack::KnapsackSolver;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What happened in one round, in generation order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoundSummary {
    /// 1-based round number.
    pub round: usize,
    /// Player chosen as util.
    pub util: PlayerId,
    /// Util value at selection time, before this round's penalty.
    pub util_value: f64,
    /// Total value of the round's lineup.
    pub total_value: f64,
}

/// Result of a diversified batch.
#[derive(Debug, Clone)]
pub struct DiversifyResult {
    /// Lineups, highest total value first.
    pub lineups: Vec<Lineup>,
    /// Per-round summaries, in generation order.
    pub rounds: Vec<RoundSummary>,
}

/// Produces a batch of progressively different lineups.
pub struct LineupDiversifier;

impl LineupDiversifier {
    /// Runs a batch over `players` with the goalies listed in
    /// `eligible_goalies`.
    pub fn run(
        players: &[Player],
        eligible_goalies: &[PlayerId],
        config: &LineupConfig,
    ) -> Result<DiversifyResult> {
        Self::run_with_cancel(players, eligible_goalies, config, None)
    }

    /// Runs a batch with an optional cancellation token.
    ///
    /// The flag is checked before each round. A cancelled batch returns
    /// [`LineupError::Cancelled`] and no lineups.
    pub fn run_with_cancel(
        players: &[Player],
        eligible_goalies: &[PlayerId],
        config: &LineupConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<DiversifyResult> {
        config.validate()?;
        let mut pool = PlayerPool::new(players, eligible_goalies, &config.skater_filter)?;
        Self::run_on_pool(&mut pool, config, cancel.as_deref())
    }

    /// Runs a batch against a caller-owned pool.
    ///
    /// On return the pool holds the penalized values.
    pub fn run_on_pool(
        pool: &mut PlayerPool,
        config: &LineupConfig,
        cancel: Option<&AtomicBool>,
    ) -> Result<DiversifyResult> {
        config.validate()?;

        let mut lineups = Vec::with_capacity(config.lineup_count);
        let mut rounds = Vec::with_capacity(config.lineup_count);

        for round in 1..=config.lineup_count {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(LineupError::Cancelled {
                    completed: round - 1,
                });
            }

            let (lineup, util) = solve_round(pool, config)?;
            info!(
                "lineup {round}: util {} ({:.2}), weight {}, value {:.3}, players {:?}",
                util.id,
                util.value,
                lineup.total_weight(),
                lineup.total_value(),
                lineup.player_ids()
            );

            pool.apply_penalty(&lineup.player_ids(), config.penalty);

            rounds.push(RoundSummary {
                round,
                util: util.id,
                util_value: util.value,
                total_value: lineup.total_value(),
            });
            lineups.push(lineup);
        }

        lineups.sort_by(|a, b| b.total_value().total_cmp(&a.total_value()));

        Ok(DiversifyResult { lineups, rounds })
    }
}

/// Picks the util, builds the groups without it, and solves one lineup.
fn solve_round(pool: &PlayerPool, config: &LineupConfig) -> Result<(Lineup, Player)> {
    let Some(util_idx) = pool.best_skater_index() else {
        return Err(LineupError::InsufficientCandidates {
            position: Position::Centre,
            available: 0,
            required: Position::Centre.arity().size(),
        });
    };
    let util = pool.skaters()[util_idx].clone();
    info!("building lineup with {} ({}) as util", util.name, util.id);

    let skaters: Vec<Player> = pool
        .skaters()
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != util_idx)
        .map(|(_, p)| p.clone())
        .collect();
    let groups = build_position_groups(&skaters, pool.goalies(), config.max_group_candidates)?;
    let util_candidate = Candidate::single(&util);

    let lineup = match config.solver {
        SolverMode::Knapsack => {
            KnapsackSolver::solve(&groups, &util_candidate, config.salary_cap, &config.knapsack)?
        }
        SolverMode::BruteForce => BruteForceSolver::solve(
            &groups,
            &util_candidate,
            config.salary_cap,
            &config.brute_force,
        )?
        .lineups
        .into_iter()
        .next()
        .ok_or(LineupError::Infeasible {
            limit: config.salary_cap,
        })?,
    };

    Ok((lineup, util))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knapsack::{KnapsackConfig, Reconstruction};
    use crate::lineup::SkaterFilter;
    use std::collections::HashMap;

    fn slate() -> Vec<Player> {
        let mut players = vec![
            Player::new(1, "Goalie A", Position::Goalie, 80, 7.5),
            Player::new(2, "Goalie B", Position::Goalie, 72, 6.8),
            Player::new(3, "Goalie C", Position::Goalie, 65, 6.9),
        ];
        let mut id = 10;
        for (position, count) in [
            (Position::Centre, 6u32),
            (Position::Wing, 8),
            (Position::Defense, 6),
        ] {
            for k in 0..count {
                let weight = 30 + (k * 7 + id as u32 * 3) % 35;
                let value = 2.0 + f64::from((k * 5 + id as u32) % 11) * 0.45;
                players.push(Player::new(
                    id,
                    format!("{position}{k}"),
                    position,
                    weight,
                    value,
                ));
                id += 1;
            }
        }
        players
    }

    fn config() -> LineupConfig {
        LineupConfig::default()
            .with_salary_cap(500)
            .with_lineup_count(6)
            .with_penalty(-0.3)
    }

    #[test]
    fn test_produces_ranked_lineups_within_cap() {
        let result = LineupDiversifier::run(&slate(), &[1, 2, 3], &config()).unwrap();
        assert_eq!(result.lineups.len(), 6);
        assert_eq!(result.rounds.len(), 6);
        for lineup in &result.lineups {
            assert!(lineup.total_weight() <= 500);
        }
        for pair in result.lineups.windows(2) {
            assert!(pair[0].total_value() >= pair[1].total_value());
        }
    }

    #[test]
    fn test_util_value_never_increases() {
        let result = LineupDiversifier::run(&slate(), &[1, 2, 3], &config()).unwrap();
        for pair in result.rounds.windows(2) {
            assert!(
                pair[1].util_value <= pair[0].util_value + 1e-12,
                "round {} util {} > round {} util {}",
                pair[1].round,
                pair[1].util_value,
                pair[0].round,
                pair[0].util_value
            );
        }
    }

    #[test]
    fn test_penalty_applied_per_appearance() {
        let players = slate();
        let original: HashMap<PlayerId, f64> = players.iter().map(|p| (p.id, p.value)).collect();
        let config = config();
        let mut pool = PlayerPool::new(&players, &[1, 2, 3], &SkaterFilter::none()).unwrap();
        let result = LineupDiversifier::run_on_pool(&mut pool, &config, None).unwrap();

        let mut uses: HashMap<PlayerId, usize> = HashMap::new();
        for lineup in &result.lineups {
            for id in lineup.player_ids() {
                *uses.entry(id).or_default() += 1;
            }
        }
        for player in pool.skaters().iter().chain(pool.goalies()) {
            let count = uses.get(&player.id).copied().unwrap_or(0);
            let expected = original[&player.id] + config.penalty * count as f64;
            assert!((player.value - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_penalty_diversifies() {
        let result = LineupDiversifier::run(
            &slate(),
            &[1, 2, 3],
            &config().with_penalty(-5.0).with_lineup_count(3),
        )
        .unwrap();
        let utils: Vec<PlayerId> = result.rounds.iter().map(|r| r.util).collect();
        assert_ne!(utils[0], utils[1]);
        assert_ne!(utils[1], utils[2]);
        assert_ne!(utils[0], utils[2]);
        for (i, a) in result.lineups.iter().enumerate() {
            for b in &result.lineups[i + 1..] {
                assert_ne!(a.player_ids(), b.player_ids());
            }
        }
    }

    #[test]
    fn test_zero_penalty_repeats_lineup() {
        let result = LineupDiversifier::run(
            &slate(),
            &[1, 2, 3],
            &config().with_penalty(0.0).with_lineup_count(3),
        )
        .unwrap();
        assert!(result
            .lineups
            .windows(2)
            .all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_brute_force_mode_agrees_on_first_round() {
        let base = config().with_lineup_count(1);
        let dp = LineupDiversifier::run(&slate(), &[1, 2, 3], &base).unwrap();
        let brute = LineupDiversifier::run(
            &slate(),
            &[1, 2, 3],
            &base.clone().with_solver(SolverMode::BruteForce),
        )
        .unwrap();
        assert!(
            (dp.lineups[0].total_value() - brute.lineups[0].total_value()).abs() < 1e-9
        );
    }

    #[test]
    fn test_legacy_reconstruction_stays_within_cap() {
        let config = config()
            .with_knapsack(KnapsackConfig::default().with_reconstruction(Reconstruction::ValueBreakpoint));
        let result = LineupDiversifier::run(&slate(), &[1, 2, 3], &config).unwrap();
        assert!(result.lineups.iter().all(|l| l.total_weight() <= 500));
    }

    #[test]
    fn test_no_starting_goalie() {
        let err = LineupDiversifier::run(&slate(), &[], &config()).unwrap_err();
        assert_eq!(err, LineupError::NoStartingGoalie);
    }

    #[test]
    fn test_short_position_aborts_batch() {
        let players: Vec<Player> = slate()
            .into_iter()
            .filter(|p| p.position != Position::Wing || p.id % 4 == 0)
            .collect();
        let err = LineupDiversifier::run(&players, &[1, 2, 3], &config()).unwrap_err();
        assert!(matches!(
            err,
            LineupError::InsufficientCandidates {
                position: Position::Wing,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err =
            LineupDiversifier::run(&slate(), &[1], &config().with_lineup_count(0)).unwrap_err();
        assert!(matches!(err, LineupError::Configuration(_)));
    }

    #[test]
    fn test_cancelled_before_first_round() {
        let cancel = Arc::new(AtomicBool::new(true));
        let err = LineupDiversifier::run_with_cancel(&slate(), &[1, 2, 3], &config(), Some(cancel))
            .unwrap_err();
        assert_eq!(err, LineupError::Cancelled { completed: 0 });
    }
}
