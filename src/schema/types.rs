// src/schema/types.rs

use serde::{Deserialize, Serialize};

use super::Stat;

/// Raw columns the canonical schema occupies: the index placeholder plus
/// Rank, Team and the 16 remaining numeric fields.
pub const CANONICAL_WIDTH: usize = 19;

/// Raw position of the `Team` column.
pub const TEAM_COLUMN: usize = 2;

/// One normalized row of a season shooting table.
///
/// The same shape carries the league-average summary row, in which case
/// `team` holds whatever label the source gave it (`League Average`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub rank: u32,
    pub team: String,
    pub games_played: u32,
    pub minutes_played: f64,
    pub field_goal_pct: f64,
    pub average_distance: f64,
    pub attempted_2p: f64,
    pub attempted_0_3: f64,
    pub attempted_3_10: f64,
    pub attempted_10_16: f64,
    pub attempted_16_plus: f64,
    pub attempted_3p: f64,
    pub made_2p: f64,
    pub made_0_3: f64,
    pub made_3_10: f64,
    pub made_10_16: f64,
    pub made_16_plus: f64,
    pub made_3p: f64,
}

impl SeasonRecord {
    pub fn value(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Rank => self.rank as f64,
            Stat::GamesPlayed => self.games_played as f64,
            Stat::MinutesPlayed => self.minutes_played,
            Stat::FieldGoalPercent => self.field_goal_pct,
            Stat::AverageDistance => self.average_distance,
            Stat::Attempted2P => self.attempted_2p,
            Stat::Attempted0To3 => self.attempted_0_3,
            Stat::Attempted3To10 => self.attempted_3_10,
            Stat::Attempted10To16 => self.attempted_10_16,
            Stat::Attempted16Plus => self.attempted_16_plus,
            Stat::Attempted3P => self.attempted_3p,
            Stat::Made2P => self.made_2p,
            Stat::Made0To3 => self.made_0_3,
            Stat::Made3To10 => self.made_3_10,
            Stat::Made10To16 => self.made_10_16,
            Stat::Made16Plus => self.made_16_plus,
            Stat::Made3P => self.made_3p,
        }
    }

    /// Every numeric field, in canonical order.
    pub fn values(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::ALL.iter().map(move |s| (*s, self.value(*s)))
    }
}
