// src/schema/stat.rs

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::AnalysisError;

/// A numeric column of the canonical shooting schema.
///
/// Declaration order is the left-to-right order of the columns in the
/// scraped tables, with `Team` (the only non-numeric column) left out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    #[serde(rename = "Rank")]
    Rank,
    #[serde(rename = "Games_Played")]
    GamesPlayed,
    #[serde(rename = "Minutes_Played")]
    MinutesPlayed,
    #[serde(rename = "Field_Goal_Percent")]
    FieldGoalPercent,
    #[serde(rename = "Average_Distance")]
    AverageDistance,
    #[serde(rename = "Field_Goals_Attempted_2PA")]
    Attempted2P,
    #[serde(rename = "2PA_0-3")]
    Attempted0To3,
    #[serde(rename = "2PA_3-10")]
    Attempted3To10,
    #[serde(rename = "2PA_10-16")]
    Attempted10To16,
    #[serde(rename = "2PA_16+")]
    Attempted16Plus,
    #[serde(rename = "Field_Goals_Attempted_3PA")]
    Attempted3P,
    #[serde(rename = "Field_Goals_2P")]
    Made2P,
    #[serde(rename = "2P_0-3")]
    Made0To3,
    #[serde(rename = "2P_3-10")]
    Made3To10,
    #[serde(rename = "2P_10-16")]
    Made10To16,
    #[serde(rename = "2P_16+")]
    Made16Plus,
    #[serde(rename = "Field_Goals_3P")]
    Made3P,
}

impl Stat {
    pub const ALL: [Stat; 17] = [
        Stat::Rank,
        Stat::GamesPlayed,
        Stat::MinutesPlayed,
        Stat::FieldGoalPercent,
        Stat::AverageDistance,
        Stat::Attempted2P,
        Stat::Attempted0To3,
        Stat::Attempted3To10,
        Stat::Attempted10To16,
        Stat::Attempted16Plus,
        Stat::Attempted3P,
        Stat::Made2P,
        Stat::Made0To3,
        Stat::Made3To10,
        Stat::Made10To16,
        Stat::Made16Plus,
        Stat::Made3P,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stat::Rank => "Rank",
            Stat::GamesPlayed => "Games_Played",
            Stat::MinutesPlayed => "Minutes_Played",
            Stat::FieldGoalPercent => "Field_Goal_Percent",
            Stat::AverageDistance => "Average_Distance",
            Stat::Attempted2P => "Field_Goals_Attempted_2PA",
            Stat::Attempted0To3 => "2PA_0-3",
            Stat::Attempted3To10 => "2PA_3-10",
            Stat::Attempted10To16 => "2PA_10-16",
            Stat::Attempted16Plus => "2PA_16+",
            Stat::Attempted3P => "Field_Goals_Attempted_3PA",
            Stat::Made2P => "Field_Goals_2P",
            Stat::Made0To3 => "2P_0-3",
            Stat::Made3To10 => "2P_3-10",
            Stat::Made10To16 => "2P_10-16",
            Stat::Made16Plus => "2P_16+",
            Stat::Made3P => "Field_Goals_3P",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stat::Rank => "Rank of team",
            Stat::GamesPlayed => "Number of games played",
            Stat::MinutesPlayed => "Minutes played by team",
            Stat::FieldGoalPercent => "Field goal percentage",
            Stat::AverageDistance => "Average distance of field goals attempted",
            Stat::Attempted2P => "Share of field goals attempted that were 2-point attempts",
            Stat::Attempted0To3 => "Share of attempts from 0-3 ft",
            Stat::Attempted3To10 => "Share of attempts from 3-10 ft",
            Stat::Attempted10To16 => "Share of attempts from 10-16 ft",
            Stat::Attempted16Plus => "Share of attempts from 16 ft to the 3-point line",
            Stat::Attempted3P => "Share of field goals attempted that were 3-point attempts",
            Stat::Made2P => "2-point field goal percentage",
            Stat::Made0To3 => "Field goal percentage from 0-3 ft",
            Stat::Made3To10 => "Field goal percentage from 3-10 ft",
            Stat::Made10To16 => "Field goal percentage from 10-16 ft",
            Stat::Made16Plus => "Field goal percentage from 16 ft to the 3-point line",
            Stat::Made3P => "3-point field goal percentage",
        }
    }

    /// Position of this stat in a raw scraped row (column 0 is the scraper's
    /// index placeholder, column 2 is `Team`).
    pub(crate) fn raw_column(self) -> usize {
        match self {
            Stat::Rank => 1,
            // every other stat sits after the Team column
            other => Stat::ALL.iter().position(|s| *s == other).unwrap_or(0) + 2,
        }
    }

    fn valid_names() -> Vec<&'static str> {
        Stat::ALL.iter().map(|s| s.name()).collect()
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spellings that appear in older notebooks and saved plots.
const ALIASES: &[(&str, Stat)] = &[
    ("Field_Goals_Attempled_2PA", Stat::Attempted2P),
    ("Field_Goals_Attempled_3PA", Stat::Attempted3P),
    ("2P_0-6", Stat::Made3To10),
    ("2P16+", Stat::Made16Plus),
];

impl FromStr for Stat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Stat::ALL
            .iter()
            .map(|stat| (stat.name(), *stat))
            .chain(ALIASES.iter().copied())
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, stat)| stat)
            .ok_or_else(|| AnalysisError::UnknownStat {
                name: wanted.to_string(),
                valid: Stat::valid_names(),
            })
    }
}
