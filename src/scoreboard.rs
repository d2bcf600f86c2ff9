//! Persistent two-team scoring
//!
//! This module tracks the cumulative totals of the two competing teams in
//! team mode. Totals only ever grow: the award operation credits a
//! completed round's score to one team and records the credit in a
//! session-long history. Nothing here is reset by round navigation.

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};

/// One of the two competing teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Team {
    /// The first team
    One,
    /// The second team
    Two,
}

/// Session-long team totals and award history
///
/// Created once per game session; survives across rounds and level
/// navigation. Totals are never decremented.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Cumulative points per team
    totals: EnumMap<Team, u64>,
    /// Every credited round in credit order
    awards: Vec<(Team, u64)>,
}

impl Scoreboard {
    /// Credits a completed round's score to a team
    ///
    /// # Arguments
    ///
    /// * `team` - The team receiving the points
    /// * `points` - The round score being credited
    pub fn award(&mut self, team: Team, points: u64) {
        self.totals[team] += points;
        self.awards.push((team, points));
    }

    /// Returns the cumulative total for one team
    pub fn total(&self, team: Team) -> u64 {
        self.totals[team]
    }

    /// Returns both totals keyed by team
    pub fn totals(&self) -> EnumMap<Team, u64> {
        self.totals
    }

    /// Returns the history of credited rounds in credit order
    pub fn awards(&self) -> &[(Team, u64)] {
        &self.awards
    }
}
