// src/season.rs

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::AnalysisError;

/// First and last season the scraped data set covers.
pub const FIRST_SEASON: Season = Season(2010);
pub const LAST_SEASON: Season = Season(2020);

/// A season, identified by the calendar year it ends in (`2010` is 2009-10).
///
/// This four-digit form is the only one used internally. The two-digit
/// suffix (`"10"`) and the label (`"09-10"`) are accepted by [`FromStr`] and
/// produced by [`Season::suffix`] / [`Season::label`] at the edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Season(u16);

impl Season {
    pub const fn new(year: u16) -> Self {
        Season(year)
    }

    pub fn year(self) -> u16 {
        self.0
    }

    /// `"10"` for 2010.
    pub fn suffix(self) -> String {
        format!("{:02}", self.0 % 100)
    }

    /// `"09-10"` for 2010.
    pub fn label(self) -> String {
        let end = self.0 % 100;
        format!("{:02}-{:02}", (end + 99) % 100, end)
    }

    /// Every season from `first` to `last`, inclusive.
    pub fn range(first: Season, last: Season) -> impl Iterator<Item = Season> {
        (first.0..=last.0).map(Season)
    }

    pub fn supported() -> impl Iterator<Item = Season> {
        Season::range(FIRST_SEASON, LAST_SEASON)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || AnalysisError::InvalidSeason(s.to_string());

        // "09-10" or "2009-10": the season is named after its second half
        if let Some((_, end)) = s.split_once('-') {
            return two_or_four_digits(end).ok_or_else(invalid);
        }
        two_or_four_digits(s).ok_or_else(invalid)
    }
}

fn two_or_four_digits(s: &str) -> Option<Season> {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n: u16 = s.parse().ok()?;
    match s.len() {
        2 => Some(Season(2000 + n)),
        4 => Some(Season(n)),
        _ => None,
    }
}

/// Which half of the year a shooting table describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonKind {
    Regular,
    Playoffs,
}

impl SeasonKind {
    pub fn from_playoff_flag(playoff: bool) -> Self {
        if playoff {
            SeasonKind::Playoffs
        } else {
            SeasonKind::Regular
        }
    }

    pub fn is_playoffs(self) -> bool {
        matches!(self, SeasonKind::Playoffs)
    }

    /// `2010.csv` or `2010p.csv`.
    pub fn file_name(self, season: Season) -> String {
        match self {
            SeasonKind::Regular => format!("{}.csv", season),
            SeasonKind::Playoffs => format!("{}p.csv", season),
        }
    }
}

impl fmt::Display for SeasonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonKind::Regular => f.write_str("regular season"),
            SeasonKind::Playoffs => f.write_str("playoffs"),
        }
    }
}
