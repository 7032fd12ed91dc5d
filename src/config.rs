// src/config.rs

use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::reconcile::NameTable;
use crate::season::{Season, FIRST_SEASON, LAST_SEASON};

/// Run configuration, normally read from a YAML file:
///
/// ```yaml
/// data_dir: Data
/// first_season: 2010
/// last_season: 2020
/// strict_joins: false
/// edge_case:
///   extremes: 5
///   top_slice: intended
/// renames:
///   - from: Seattle SuperSonics
///     to: Oklahoma City Thunder
/// ```
///
/// Every key is optional; missing keys take the [`Default`] value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding `{year}.csv` / `{year}p.csv`.
    pub data_dir: PathBuf,
    pub first_season: Season,
    pub last_season: Season,
    /// Standings directory, relative to `data_dir`.
    pub win_loss_dir: PathBuf,
    /// Playoff series results directory, relative to `data_dir`.
    pub playoffs_dir: PathBuf,
    /// eFG% table, relative to `data_dir`.
    pub efg_file: PathBuf,
    /// Fail a join instead of logging names that match nothing.
    pub strict_joins: bool,
    pub edge_case: EdgeCaseConfig,
    /// Extra old-name → current-name entries on top of the built-in ones.
    pub renames: Vec<Rename>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Data"),
            first_season: FIRST_SEASON,
            last_season: LAST_SEASON,
            win_loss_dir: PathBuf::from("win-loss"),
            playoffs_dir: PathBuf::from("playoffs"),
            efg_file: PathBuf::from("efg/efg.csv"),
            strict_joins: false,
            edge_case: EdgeCaseConfig::default(),
            renames: Vec::new(),
        }
    }
}

/// Half of a thirty-team league.
pub const MAX_EXTREMES: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdgeCaseConfig {
    /// Teams taken from each end of the ranking.
    pub extremes: usize,
    pub top_slice: TopSlice,
}

impl Default for EdgeCaseConfig {
    fn default() -> Self {
        Self {
            extremes: 5,
            top_slice: TopSlice::Intended,
        }
    }
}

/// How the "top" end of the edge-case ranking is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopSlice {
    /// The `extremes` highest values.
    Intended,
    /// What the first published charts used: the second- through
    /// `extremes`-th highest values plus the single lowest value. Only
    /// useful for reproducing those charts.
    HistoricalParity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

impl Config {
    /// Read and validate a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&text)?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_season > self.last_season {
            return Err(AnalysisError::Config(format!(
                "first_season {} is after last_season {}",
                self.first_season, self.last_season
            )));
        }
        if !(1..=MAX_EXTREMES).contains(&self.edge_case.extremes) {
            return Err(AnalysisError::Config(format!(
                "edge_case.extremes must be between 1 and {MAX_EXTREMES}, got {}",
                self.edge_case.extremes
            )));
        }
        self.name_table().map(|_| ())
    }

    /// Built-in renames plus the configured extras.
    pub fn name_table(&self) -> Result<NameTable> {
        NameTable::with_extra(self.renames.iter().map(|r| (r.from.as_str(), r.to.as_str())))
    }

    pub fn seasons(&self) -> impl Iterator<Item = Season> {
        Season::range(self.first_season, self.last_season)
    }
}
