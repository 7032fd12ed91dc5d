// src/source/efg.rs

use csv::ReaderBuilder;
use serde::Serialize;
use std::fs::File;
use tracing::debug;

use super::SeasonStore;
use crate::error::{AnalysisError, Result};
use crate::process::utils::parse_number;
use crate::season::Season;

/// One team-season eFG% value. The source table does not say which team.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EfgRecord {
    pub season: Season,
    pub efg: f64,
}

impl SeasonStore {
    /// The eFG% table. Columns are located by their `Year` and `eFG%`
    /// headers because the scraper sometimes prepends an index column.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn efg(&self) -> Result<Vec<EfgRecord>> {
        let path = self.base.join(&self.config.efg_file);
        let table = path.display().to_string();
        if !path.is_file() {
            return Err(AnalysisError::MissingTable { path });
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(File::open(&path)?);
        let headers = rdr.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| AnalysisError::schema(&table, format!("no `{name}` column")))
        };
        let (year_col, efg_col) = (column("Year")?, column("eFG%")?);

        let mut out = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let season: Season = record.get(year_col).unwrap_or_default().parse()?;
            let efg = record
                .get(efg_col)
                .and_then(parse_number)
                .ok_or_else(|| AnalysisError::schema(&table, format!("row {idx}: bad eFG%")))?;
            out.push(EfgRecord { season, efg });
        }

        debug!(rows = out.len(), "loaded eFG% table");
        Ok(out)
    }
}
