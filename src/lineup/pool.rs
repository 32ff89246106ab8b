//! Mutable player values shared across diversification rounds.

use super::config::SkaterFilter;
use crate::candidate::{Player, PlayerId, Position};
use crate::error::{LineupError, Result};
use log::debug;
use std::collections::HashSet;

/// Skaters and eligible goalies for one batch.
///
/// The pool is the only state carried from one round to the next: the
/// diversifier lowers the value of every selected player between rounds.
/// Weights never change.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    skaters: Vec<Player>,
    goalies: Vec<Player>,
}

impl PlayerPool {
    /// Splits `players` into filtered skaters and the goalies listed in
    /// `eligible_goalies`.
    ///
    /// Fails with [`LineupError::Configuration`] if any player value is not
    /// finite, and with [`LineupError::NoStartingGoalie`] if no goalie in
    /// `players` is eligible.
    pub fn new(
        players: &[Player],
        eligible_goalies: &[PlayerId],
        filter: &SkaterFilter,
    ) -> Result<Self> {
        if let Some(p) = players.iter().find(|p| !p.value.is_finite()) {
            return Err(LineupError::Configuration(format!(
                "player {} ({}) has non-finite value {}",
                p.name, p.id, p.value
            )));
        }
        let eligible: HashSet<PlayerId> = eligible_goalies.iter().copied().collect();

        let goalies: Vec<Player> = players
            .iter()
            .filter(|p| p.position == Position::Goalie && eligible.contains(&p.id))
            .cloned()
            .collect();
        if goalies.is_empty() {
            return Err(LineupError::NoStartingGoalie);
        }

        let skaters: Vec<Player> = players
            .iter()
            .filter(|p| p.position.is_skater() && filter.accepts(p))
            .cloned()
            .collect();
        debug!(
            "player pool: {} skaters, {} goalies",
            skaters.len(),
            goalies.len()
        );

        Ok(Self { skaters, goalies })
    }

    pub fn skaters(&self) -> &[Player] {
        &self.skaters
    }

    pub fn goalies(&self) -> &[Player] {
        &self.goalies
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.skaters
            .iter()
            .chain(self.goalies.iter())
            .find(|p| p.id == id)
    }

    /// Index of the highest-value skater; the earliest one wins ties.
    pub fn best_skater_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.skaters.iter().enumerate() {
            if best.is_none_or(|(_, value)| p.value > value) {
                best = Some((i, p.value));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Adds `delta` to the value of every listed player and returns how many
    /// players were adjusted.
    pub fn apply_penalty(&mut self, ids: &[PlayerId], delta: f64) -> usize {
        let mut adjusted = 0;
        for player in self.skaters.iter_mut().chain(self.goalies.iter_mut()) {
            if ids.contains(&player.id) {
                debug!("lowering value of {} ({}) by {delta}", player.name, player.id);
                player.value += delta;
                adjusted += 1;
            }
        }
        adjusted
    }
}
