//! Salary-capped lineup optimization for daily fantasy hockey.
//!
//! Picks a roster of one goalie, two centres, three wingers, two defensemen,
//! and one util skater that maximizes projected score under a salary cap,
//! then repeats the selection to produce a ranked batch of diverse lineups.
//!
//! - **Candidates**: players, and the centre/defense pairs and wing triples
//!   generated from them.
//! - **Knapsack**: multiple-choice knapsack DP picking one candidate per
//!   position group.
//! - **Brute force**: exhaustive enumeration with a bounded top-K working
//!   set, used to cross-check the DP on small inputs.
//! - **Lineup**: the validated lineup record and the diversification loop
//!   that penalizes players already used.
//!
//! # Architecture
//!
//! Fetching projections, storing lineups, and exporting them are left to
//! callers. They hand this crate a list of scored players, the eligible
//! goalies, and a [`LineupConfig`](lineup::LineupConfig), and get ranked
//! [`Lineup`](lineup::Lineup)s back.
//!
//! # Example
//!
//! ```
//! use lineup_optimizer::candidate::{Player, Position};
//! use lineup_optimizer::lineup::{LineupConfig, LineupDiversifier};
//!
//! let mut players = vec![Player::new(1, "Goalie", Position::Goalie, 70, 6.0)];
//! for (id, position) in (10..).zip(
//!     [Position::Centre; 3]
//!         .into_iter()
//!         .chain([Position::Wing; 4])
//!         .chain([Position::Defense; 3]),
//! ) {
//!     players.push(Player::new(id, format!("S{id}"), position, 40, 1.0 + id as f64 * 0.1));
//! }
//!
//! let config = LineupConfig::default().with_lineup_count(2);
//! let result = LineupDiversifier::run(&players, &[1], &config).unwrap();
//! assert_eq!(result.lineups.len(), 2);
//! assert!(result.lineups[0].total_weight() <= 500);
//! ```

pub mod brute_force;
pub mod candidate;
pub mod error;
pub mod knapsack;
pub mod lineup;

pub use error::{LineupError, Result, Stage};
