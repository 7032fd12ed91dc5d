// src/source/mod.rs
//! Access to the scraped tables on disk.
//!
//! Every path is resolved against the store's base directory; nothing here
//! reads or changes the process working directory.

pub mod efg;
pub mod standings;

use glob::glob;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::process::{load_raw_table, normalize, RawTable, RowPolicy};
use crate::reconcile::NameTable;
use crate::schema::SeasonRecord;
use crate::season::{Season, SeasonKind};

pub use efg::EfgRecord;

/// Read-only view of one data directory.
#[derive(Debug, Clone)]
pub struct SeasonStore {
    base: PathBuf,
    config: Config,
    names: NameTable,
}

impl SeasonStore {
    /// Store over `base` with default settings.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let config = Config::default().with_data_dir(base);
        Self {
            base: config.data_dir.clone(),
            config,
            names: NameTable::default(),
        }
    }

    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let names = config.name_table()?;
        Ok(Self {
            base: config.data_dir.clone(),
            config,
            names,
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Seasons covered by the configured range.
    pub fn seasons(&self) -> impl Iterator<Item = Season> {
        self.config.seasons()
    }

    pub fn shooting_path(&self, season: Season, kind: SeasonKind) -> PathBuf {
        self.base.join(kind.file_name(season))
    }

    /// Every team row of one shooting table.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn full_season(&self, season: Season, kind: SeasonKind) -> Result<Vec<SeasonRecord>> {
        let raw = self.raw_table(season, kind)?;
        normalize(&raw, RowPolicy::TeamRows)
    }

    /// The league-average row of one shooting table.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn season_summary(&self, season: Season, kind: SeasonKind) -> Result<SeasonRecord> {
        let raw = self.raw_table(season, kind)?;
        normalize(&raw, RowPolicy::SummaryRow)?
            .pop()
            .ok_or_else(|| AnalysisError::schema(&raw.name, "no league summary row"))
    }

    fn raw_table(&self, season: Season, kind: SeasonKind) -> Result<RawTable> {
        let path = self.shooting_path(season, kind);
        if !path.is_file() {
            return Err(AnalysisError::MissingSource { season, kind, path });
        }
        load_raw_table(&path)
    }

    /// Shooting tables of `kind` present on disk, in file-name order.
    ///
    /// Anything that is not named `{year}.csv` / `{year}p.csv` is ignored,
    /// so playoff files never leak into a regular-season listing.
    pub fn source_files(&self, kind: SeasonKind) -> Result<Vec<(Season, PathBuf)>> {
        let pattern = format!("{}/*.csv", self.base.display());
        let name_re = Regex::new(r"^(\d{4})(p?)\.csv$").expect("static regex should compile");

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in glob(&pattern).map_err(|e| AnalysisError::Config(e.to_string()))? {
            match entry {
                Ok(path) => paths.push(path),
                Err(e) => warn!("cannot read directory entry: {}", e),
            }
        }
        paths.sort();

        let mut out = Vec::new();
        for path in paths {
            let Some(file_name) = path.file_name().and_then(|f| f.to_str()) else {
                continue;
            };
            let Some(caps) = name_re.captures(file_name) else {
                debug!(file_name, "not a shooting table");
                continue;
            };
            if SeasonKind::from_playoff_flag(!caps[2].is_empty()) != kind {
                continue;
            }
            let season: Season = caps[1].parse()?;
            out.push((season, path));
        }
        Ok(out)
    }
}
