//! Candidate model and combination generation.
//!
//! A [`Candidate`] is the unit a solver picks: one goalie, a centre pair, a
//! wing triple, or a defense pair. Candidates for one solve are collected
//! into [`PositionGroup`]s, one per DP item class, and bundled as
//! [`PositionGroups`].

mod generator;
mod types;

pub use generator::{
    build_position_groups, combination_count, find_player_pair, find_player_triples,
};
pub use types::{
    Arity, Candidate, Members, Player, PlayerId, Position, PositionGroup, PositionGroups,
};
