//! The validated lineup record.

use crate::candidate::{Arity, Candidate, PlayerId, Position};
use crate::error::{LineupError, Result};
use std::collections::HashSet;

/// Number of player slots in a lineup.
pub const LINEUP_SIZE: usize = 9;

/// Slot labels in export order.
pub const SLOT_LABELS: [&str; LINEUP_SIZE] = ["C", "C", "W", "W", "W", "D", "D", "G", "UTIL"];

/// A complete roster: goalie, centre pair, wing triple, defense pair, util.
///
/// Construction checks that every slot holds the right kind of candidate,
/// that no player fills two slots, and that the total weight fits the cap.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lineup {
    goalie: Candidate,
    centres: Candidate,
    wingers: Candidate,
    defense: Candidate,
    util: Candidate,
    total_weight: u64,
    total_value: f64,
}

impl Lineup {
    pub fn new(
        goalie: Candidate,
        centres: Candidate,
        wingers: Candidate,
        defense: Candidate,
        util: Candidate,
        cap: i64,
    ) -> Result<Self> {
        check_slot("G", &goalie, Arity::Single, |p| p == Position::Goalie)?;
        check_slot("C", &centres, Arity::Pair, |p| p == Position::Centre)?;
        check_slot("W", &wingers, Arity::Triple, |p| p == Position::Wing)?;
        check_slot("D", &defense, Arity::Pair, |p| p == Position::Defense)?;
        check_slot("UTIL", &util, Arity::Single, Position::is_skater)?;

        let slots = [&centres, &wingers, &defense, &goalie, &util];

        let mut seen = HashSet::with_capacity(LINEUP_SIZE);
        for id in slots.iter().flat_map(|c| c.ids()) {
            if !seen.insert(*id) {
                return Err(LineupError::DuplicatePlayer { id: *id });
            }
        }

        let total_weight = slots
            .iter()
            .try_fold(0u64, |acc, c| acc.checked_add(c.weight))
            .unwrap_or(u64::MAX);
        let total_value: f64 = slots.iter().map(|c| c.value).sum();
        if i128::from(total_weight) > i128::from(cap) {
            return Err(LineupError::OverCap { total_weight, cap });
        }

        Ok(Self {
            goalie,
            centres,
            wingers,
            defense,
            util,
            total_weight,
            total_value,
        })
    }

    pub fn goalie(&self) -> &Candidate {
        &self.goalie
    }

    pub fn centres(&self) -> &Candidate {
        &self.centres
    }

    pub fn wingers(&self) -> &Candidate {
        &self.wingers
    }

    pub fn defense(&self) -> &Candidate {
        &self.defense
    }

    pub fn util(&self) -> &Candidate {
        &self.util
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    /// Player ids in export order, matching [`SLOT_LABELS`].
    pub fn player_ids(&self) -> [PlayerId; LINEUP_SIZE] {
        let mut ids = [0; LINEUP_SIZE];
        let slots = [
            &self.centres,
            &self.wingers,
            &self.defense,
            &self.goalie,
            &self.util,
        ];
        for (slot, id) in ids
            .iter_mut()
            .zip(slots.iter().flat_map(|c| c.ids().iter()))
        {
            *slot = *id;
        }
        ids
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.player_ids().contains(&id)
    }
}

fn check_slot(
    slot: &str,
    candidate: &Candidate,
    arity: Arity,
    position_ok: impl Fn(Position) -> bool,
) -> Result<()> {
    if candidate.arity() != arity || !position_ok(candidate.position) {
        return Err(LineupError::Configuration(format!(
            "{slot} slot cannot hold a {:?} of {}",
            candidate.arity(),
            candidate.position
        )));
    }
    Ok(())
}
