//! Pair and triple generation for multi-slot positions.
//!
//! Combinations are emitted in index order (`i < j < k` over the filtered
//! pool), so each unordered combination appears exactly once and the
//! members keep their input order. No value or weight pruning happens here;
//! callers filter the pool beforehand if they need to.

use super::types::{Candidate, Player, Position, PositionGroup, PositionGroups};
use crate::error::{LineupError, Result};
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Every unordered pair of players at `position`.
///
/// Returns an empty list when fewer than two players match.
pub fn find_player_pair(players: &[Player], position: Position) -> Vec<Candidate> {
    let pool = filter_position(players, position);
    debug!("{} players used in {position} pairs", pool.len());

    let pairs = pairs_of(&pool);
    debug!("{} {position} pairs generated", pairs.len());
    pairs
}

/// Every unordered triple of players at `position`.
///
/// Returns an empty list when fewer than three players match.
pub fn find_player_triples(players: &[Player], position: Position) -> Vec<Candidate> {
    let pool = filter_position(players, position);
    debug!("{} players used in {position} triples", pool.len());

    let triples = triples_of(&pool);
    debug!("{} {position} triples generated", triples.len());
    triples
}

/// Number of `k`-combinations of `n` items.
pub fn combination_count(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u128, |acc, i| acc * (n - i) as u128 / (i + 1) as u128)
}

/// Builds the goalie, centre, wing, and defense groups for one solve.
///
/// `skaters` must already exclude the util player. Each multi-slot group is
/// checked against `max_group_candidates` (0 = unlimited) before any
/// combination is allocated.
pub fn build_position_groups(
    skaters: &[Player],
    goalies: &[Player],
    max_group_candidates: usize,
) -> Result<PositionGroups> {
    let goalie_group = PositionGroup::singles(Position::Goalie, goalies);
    if goalie_group.is_empty() {
        return Err(LineupError::NoStartingGoalie);
    }

    let centres = build_group(skaters, Position::Centre, max_group_candidates)?;
    let wingers = build_group(skaters, Position::Wing, max_group_candidates)?;
    let defense = build_group(skaters, Position::Defense, max_group_candidates)?;

    PositionGroups::new(goalie_group, centres, wingers, defense)
}

fn build_group(players: &[Player], position: Position, budget: usize) -> Result<PositionGroup> {
    let required = position.arity().size();
    let available = players.iter().filter(|p| p.position == position).count();
    if available < required {
        return Err(LineupError::InsufficientCandidates {
            position,
            available,
            required,
        });
    }

    let combinations = combination_count(available, required);
    if budget > 0 && combinations > budget as u128 {
        return Err(LineupError::EnumerationBudget {
            position,
            combinations,
            budget,
        });
    }

    let candidates = match required {
        3 => find_player_triples(players, position),
        2 => find_player_pair(players, position),
        _ => players
            .iter()
            .filter(|p| p.position == position)
            .map(Candidate::single)
            .collect(),
    };
    Ok(PositionGroup::new(position, candidates))
}

fn filter_position(players: &[Player], position: Position) -> Vec<&Player> {
    players.iter().filter(|p| p.position == position).collect()
}

#[cfg(not(feature = "parallel"))]
fn pairs_of(pool: &[&Player]) -> Vec<Candidate> {
    let n = pool.len();
    let mut out = Vec::with_capacity(combination_count(n, 2) as usize);
    for i in 0..n {
        for j in (i + 1)..n {
            out.push(Candidate::pair(pool[i], pool[j]));
        }
    }
    out
}

#[cfg(feature = "parallel")]
fn pairs_of(pool: &[&Player]) -> Vec<Candidate> {
    let n = pool.len();
    (0..n)
        .into_par_iter()
        .flat_map_iter(|i| ((i + 1)..n).map(move |j| Candidate::pair(pool[i], pool[j])))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn triples_of(pool: &[&Player]) -> Vec<Candidate> {
    let n = pool.len();
    let mut out = Vec::with_capacity(combination_count(n, 3) as usize);
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                out.push(Candidate::triple(pool[i], pool[j], pool[k]));
            }
        }
    }
    out
}

#[cfg(feature = "parallel")]
fn triples_of(pool: &[&Player]) -> Vec<Candidate> {
    let n = pool.len();
    (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            ((i + 1)..n).flat_map(move |j| {
                ((j + 1)..n).map(move |k| Candidate::triple(pool[i], pool[j], pool[k]))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn player(id: u64, position: Position, weight: u32, value: f64) -> Player {
        Player::new(id, format!("P{id}"), position, weight, value)
    }

    #[test]
    fn test_single_pair_from_two_centres() {
        let players = vec![
            player(1, Position::Centre, 10, 5.0),
            player(2, Position::Centre, 10, 5.0),
        ];
        let pairs = find_player_pair(&players, Position::Centre);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].ids(), &[1, 2]);
        assert_eq!(pairs[0].weight, 20);
        assert!((pairs[0].value - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_pairs_ignore_other_positions() {
        let players = vec![
            player(1, Position::Centre, 10, 1.0),
            player(2, Position::Wing, 10, 1.0),
            player(3, Position::Centre, 12, 2.0),
            player(4, Position::Defense, 10, 1.0),
            player(5, Position::Centre, 14, 3.0),
        ];
        let pairs = find_player_pair(&players, Position::Centre);
        let ids: Vec<&[u64]> = pairs.iter().map(|c| c.ids()).collect();
        assert_eq!(ids, vec![&[1, 3][..], &[1, 5][..], &[3, 5][..]]);
    }

    #[test]
    fn test_too_few_players_is_empty() {
        let players = vec![
            player(1, Position::Wing, 10, 1.0),
            player(2, Position::Wing, 10, 1.0),
        ];
        assert!(find_player_triples(&players, Position::Wing).is_empty());
        assert!(find_player_pair(&players[..1], Position::Wing).is_empty());
        assert!(find_player_pair(&[], Position::Defense).is_empty());
    }

    #[test]
    fn test_triples_in_index_order() {
        let players: Vec<Player> = (1..=4)
            .map(|id| player(id, Position::Wing, 10 * id as u32, id as f64))
            .collect();
        let triples = find_player_triples(&players, Position::Wing);
        let ids: Vec<Vec<u64>> = triples.iter().map(|c| c.ids().to_vec()).collect();
        assert_eq!(
            ids,
            vec![vec![1, 2, 3], vec![1, 2, 4], vec![1, 3, 4], vec![2, 3, 4]]
        );
        assert_eq!(triples[3].weight, 90);
        assert!((triples[3].value - 9.0).abs() < 1e-12);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_generation_keeps_index_order() {
        let players: Vec<Player> = (0..25)
            .map(|id| player(id, Position::Wing, 10 + id as u32, 0.5 * id as f64))
            .collect();
        let pool: Vec<&Player> = players.iter().collect();

        let mut pairs = Vec::new();
        let mut triples = Vec::new();
        for i in 0..pool.len() {
            for j in (i + 1)..pool.len() {
                pairs.push(Candidate::pair(pool[i], pool[j]));
                for k in (j + 1)..pool.len() {
                    triples.push(Candidate::triple(pool[i], pool[j], pool[k]));
                }
            }
        }

        assert_eq!(pairs_of(&pool), pairs);
        assert_eq!(triples_of(&pool), triples);
    }

    #[test]
    fn test_combination_count() {
        assert_eq!(combination_count(5, 2), 10);
        assert_eq!(combination_count(10, 3), 120);
        assert_eq!(combination_count(2, 3), 0);
        assert_eq!(combination_count(4, 0), 1);
        assert_eq!(combination_count(200, 3), 1_313_400);
    }

    #[test]
    fn test_build_groups_reports_short_position() {
        let skaters = vec![
            player(1, Position::Centre, 10, 1.0),
            player(2, Position::Centre, 10, 1.0),
            player(3, Position::Wing, 10, 1.0),
            player(4, Position::Wing, 10, 1.0),
            player(5, Position::Defense, 10, 1.0),
            player(6, Position::Defense, 10, 1.0),
        ];
        let goalies = vec![player(9, Position::Goalie, 50, 8.0)];
        let err = build_position_groups(&skaters, &goalies, 0).unwrap_err();
        assert_eq!(
            err,
            LineupError::InsufficientCandidates {
                position: Position::Wing,
                available: 2,
                required: 3,
            }
        );
    }

    #[test]
    fn test_build_groups_without_goalie() {
        let err = build_position_groups(&[], &[], 0).unwrap_err();
        assert_eq!(err, LineupError::NoStartingGoalie);
    }

    #[test]
    fn test_build_groups_enforces_budget() {
        let skaters: Vec<Player> = (0..12)
            .map(|id| {
                let position = match id % 3 {
                    0 => Position::Centre,
                    1 => Position::Wing,
                    _ => Position::Defense,
                };
                player(id, position, 10, 1.0)
            })
            .collect();
        let goalies = vec![player(99, Position::Goalie, 50, 8.0)];

        let groups = build_position_groups(&skaters, &goalies, 6).unwrap();
        assert_eq!(groups.centres.len(), 6);
        assert_eq!(groups.wingers.len(), 4);

        let err = build_position_groups(&skaters, &goalies, 5).unwrap_err();
        assert!(matches!(
            err,
            LineupError::EnumerationBudget {
                position: Position::Centre,
                combinations: 6,
                budget: 5,
            }
        ));
    }

    proptest! {
        #[test]
        fn prop_candidates_are_exact_sums(
            specs in prop::collection::vec((0u32..200, 0.0f64..50.0, 0usize..3), 0..12)
        ) {
            let positions = [Position::Centre, Position::Wing, Position::Defense];
            let players: Vec<Player> = specs
                .iter()
                .enumerate()
                .map(|(i, &(w, v, p))| player(i as u64, positions[p], w, v))
                .collect();
            let by_id = |id: u64| &players[id as usize];

            for position in positions {
                let n = players.iter().filter(|p| p.position == position).count();
                let pairs = find_player_pair(&players, position);
                let triples = find_player_triples(&players, position);
                prop_assert_eq!(pairs.len() as u128, combination_count(n, 2));
                prop_assert_eq!(triples.len() as u128, combination_count(n, 3));

                let mut seen = HashSet::new();
                for c in pairs.iter().chain(triples.iter()) {
                    prop_assert!(seen.insert(c.ids().to_vec()));
                    let weight: u64 = c.ids().iter().map(|&id| u64::from(by_id(id).weight)).sum();
                    let value: f64 = c.ids().iter().map(|&id| by_id(id).value).sum();
                    prop_assert_eq!(c.weight, weight);
                    prop_assert!((c.value - value).abs() < 1e-9);
                    prop_assert!(c.ids().iter().all(|&id| by_id(id).position == position));
                    prop_assert!(c.ids().windows(2).all(|w| w[0] < w[1]));
                }
            }
        }
    }
}
