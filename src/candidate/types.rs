//! Players, candidates, and position groups.

use crate::error::{LineupError, Result};
use std::fmt;
use std::str::FromStr;

/// Identifier of a player, as issued by the contest provider.
pub type PlayerId = u64;

/// Roster position of a player.
///
/// Positions are a closed set so that every per-position dispatch is an
/// exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    Goalie,
    Centre,
    Wing,
    Defense,
}

impl Position {
    /// Every position, in DP group order.
    pub const ALL: [Position; 4] = [
        Position::Goalie,
        Position::Centre,
        Position::Wing,
        Position::Defense,
    ];

    /// Short contest tag (`G`, `C`, `W`, `D`).
    pub fn tag(self) -> &'static str {
        match self {
            Position::Goalie => "G",
            Position::Centre => "C",
            Position::Wing => "W",
            Position::Defense => "D",
        }
    }

    /// Returns `true` for every position that can fill the util slot.
    pub fn is_skater(self) -> bool {
        !matches!(self, Position::Goalie)
    }

    /// Number of players a lineup takes at this position, util excluded.
    pub fn arity(self) -> Arity {
        match self {
            Position::Goalie => Arity::Single,
            Position::Centre | Position::Defense => Arity::Pair,
            Position::Wing => Arity::Triple,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Position {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "G" => Ok(Position::Goalie),
            "C" => Ok(Position::Centre),
            "W" | "LW" | "RW" => Ok(Position::Wing),
            "D" => Ok(Position::Defense),
            other => Err(LineupError::Configuration(format!(
                "unknown position tag: {other}"
            ))),
        }
    }
}

/// A scored, priced player.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    /// Salary cost.
    pub weight: u32,
    /// Projected score.
    pub value: f64,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        position: Position,
        weight: u32,
        value: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            weight,
            value,
        }
    }
}

/// Size of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arity {
    Single,
    Pair,
    Triple,
}

impl Arity {
    pub fn size(self) -> usize {
        match self {
            Arity::Single => 1,
            Arity::Pair => 2,
            Arity::Triple => 3,
        }
    }
}

/// Player ids making up a candidate, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Members {
    Single([PlayerId; 1]),
    Pair([PlayerId; 2]),
    Triple([PlayerId; 3]),
}

impl Members {
    pub fn ids(&self) -> &[PlayerId] {
        match self {
            Members::Single(ids) => ids,
            Members::Pair(ids) => ids,
            Members::Triple(ids) => ids,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Members::Single(_) => Arity::Single,
            Members::Pair(_) => Arity::Pair,
            Members::Triple(_) => Arity::Triple,
        }
    }
}

/// One selectable unit for a DP group: a single player or a same-position
/// combination.
///
/// `weight` and `value` are the sums of the members' weight and value at the
/// time the candidate was built. Weights are summed in `u64`, so no
/// combination of `u32` player weights can overflow.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub position: Position,
    pub members: Members,
    pub weight: u64,
    pub value: f64,
}

impl Candidate {
    pub fn single(player: &Player) -> Self {
        Self {
            position: player.position,
            members: Members::Single([player.id]),
            weight: u64::from(player.weight),
            value: player.value,
        }
    }

    /// Both players must share a position; the first player's position is used.
    pub fn pair(a: &Player, b: &Player) -> Self {
        debug_assert_eq!(a.position, b.position);
        Self {
            position: a.position,
            members: Members::Pair([a.id, b.id]),
            weight: u64::from(a.weight) + u64::from(b.weight),
            value: a.value + b.value,
        }
    }

    pub fn triple(a: &Player, b: &Player, c: &Player) -> Self {
        debug_assert!(a.position == b.position && b.position == c.position);
        Self {
            position: a.position,
            members: Members::Triple([a.id, b.id, c.id]),
            weight: u64::from(a.weight) + u64::from(b.weight) + u64::from(c.weight),
            value: a.value + b.value + c.value,
        }
    }

    pub fn ids(&self) -> &[PlayerId] {
        self.members.ids()
    }

    pub fn arity(&self) -> Arity {
        self.members.arity()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.ids().contains(&id)
    }
}

/// The candidate list for one DP item class.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionGroup {
    position: Position,
    candidates: Vec<Candidate>,
}

impl PositionGroup {
    pub fn new(position: Position, candidates: Vec<Candidate>) -> Self {
        Self {
            position,
            candidates,
        }
    }

    /// Wraps every player at `position` as a [`Candidate::single`].
    pub fn singles(position: Position, players: &[Player]) -> Self {
        let candidates = players
            .iter()
            .filter(|p| p.position == position)
            .map(Candidate::single)
            .collect();
        Self::new(position, candidates)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Fails with [`LineupError::InsufficientCandidates`] when the group is empty.
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.candidates.is_empty() {
            return Err(LineupError::InsufficientCandidates {
                position: self.position,
                available: 0,
                required: self.position.arity().size(),
            });
        }
        Ok(())
    }
}

/// The four groups a solver chooses from, one candidate each.
#[derive(Debug, Clone)]
pub struct PositionGroups {
    pub goalies: PositionGroup,
    pub centres: PositionGroup,
    pub wingers: PositionGroup,
    pub defense: PositionGroup,
}

impl PositionGroups {
    /// Bundles the four groups, checking positions and that none is empty.
    pub fn new(
        goalies: PositionGroup,
        centres: PositionGroup,
        wingers: PositionGroup,
        defense: PositionGroup,
    ) -> Result<Self> {
        let groups = Self {
            goalies,
            centres,
            wingers,
            defense,
        };
        for (expected, group) in Position::ALL.iter().zip(groups.in_order()) {
            if group.position() != *expected {
                return Err(LineupError::Configuration(format!(
                    "expected a {expected} group, got {}",
                    group.position()
                )));
            }
            group.ensure_non_empty()?;
        }
        Ok(groups)
    }

    /// Groups in DP order: goalie, centre, wing, defense.
    pub fn in_order(&self) -> [&PositionGroup; 4] {
        [&self.goalies, &self.centres, &self.wingers, &self.defense]
    }
}
