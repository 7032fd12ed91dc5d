// src/source/standings.rs

use csv::ReaderBuilder;
use std::{
    collections::BTreeMap,
    fs::File,
    path::{Path, PathBuf},
};
use tracing::debug;

use super::SeasonStore;
use crate::error::{AnalysisError, Result};
use crate::process::utils::{clean_str, clean_team, parse_count};
use crate::season::{Season, SeasonKind};

/// Games a team must win to take a playoff series.
const SERIES_WINS: u32 = 4;
/// Series needed to win the title.
pub const MAX_ROUNDS: u8 = 4;

/// Wins and losses of one team in one regular season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32,
}

impl SeasonStore {
    pub fn win_loss_path(&self, season: Season) -> PathBuf {
        self.base
            .join(&self.config.win_loss_dir)
            .join(format!("all_records_{season}.csv"))
    }

    pub fn playoff_path(&self, season: Season) -> PathBuf {
        self.base
            .join(&self.config.playoffs_dir)
            .join(format!("series_won_{season}.csv"))
    }

    /// Regular-season standings, keyed by team name as the source spells it
    /// for that year (marker stripped). Columns: team, wins, losses.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn win_loss(&self, season: Season) -> Result<BTreeMap<String, WinLoss>> {
        let path = self.win_loss_path(season);
        let table = path.display().to_string();
        let mut out = BTreeMap::new();

        for (idx, row) in read_rows(season, SeasonKind::Regular, &path)?
            .into_iter()
            .enumerate()
        {
            let [team, wins, losses] = match row.as_slice() {
                [t, w, l, ..] => [t, w, l],
                _ => {
                    return Err(AnalysisError::schema(
                        &table,
                        format!("row {idx}: need 3 columns"),
                    ))
                }
            };
            let team = clean_team(team);
            let (Some(wins), Some(losses)) = (parse_count(wins), parse_count(losses)) else {
                return Err(AnalysisError::schema(
                    &table,
                    format!("row {idx}: bad record for `{team}`"),
                ));
            };
            if out.insert(team.clone(), WinLoss { wins, losses }).is_some() {
                return Err(AnalysisError::schema(&table, format!("`{team}` listed twice")));
            }
        }

        debug!(%season, teams = out.len(), "loaded standings");
        Ok(out)
    }

    /// Playoff series won per team. The value column is either the count
    /// itself or the team's playoff game record (`W-L`), in which case the
    /// count is `W / 4`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn playoff_advancement(&self, season: Season) -> Result<BTreeMap<String, u8>> {
        let path = self.playoff_path(season);
        let table = path.display().to_string();
        let mut out = BTreeMap::new();

        for (idx, row) in read_rows(season, SeasonKind::Playoffs, &path)?
            .into_iter()
            .enumerate()
        {
            let [team, value] = match row.as_slice() {
                [t, v, ..] => [t, v],
                _ => {
                    return Err(AnalysisError::schema(
                        &table,
                        format!("row {idx}: need 2 columns"),
                    ))
                }
            };
            let team = clean_team(team);
            let rounds = parse_rounds(value).filter(|r| *r <= MAX_ROUNDS).ok_or_else(|| {
                AnalysisError::schema(
                    &table,
                    format!("row {idx}: `{value}` is not a rounds-won count for `{team}`"),
                )
            })?;
            if out.insert(team.clone(), rounds).is_some() {
                return Err(AnalysisError::schema(&table, format!("`{team}` listed twice")));
            }
        }

        debug!(%season, teams = out.len(), "loaded playoff results");
        Ok(out)
    }
}

fn parse_rounds(raw: &str) -> Option<u8> {
    let cleaned = clean_str(raw);
    let count = match cleaned.split_once('-') {
        Some((wins, _losses)) => parse_count(wins)? / SERIES_WINS,
        None => parse_count(&cleaned)?,
    };
    u8::try_from(count).ok()
}

/// Data rows of a small header-first CSV, with blank lines dropped.
fn read_rows(season: Season, kind: SeasonKind, path: &Path) -> Result<Vec<Vec<String>>> {
    if !path.is_file() {
        return Err(AnalysisError::MissingSource {
            season,
            kind,
            path: path.to_path_buf(),
        });
    }
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(File::open(path)?);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;

    fn store_with(dir: &std::path::Path) -> SeasonStore {
        fs::create_dir_all(dir.join("win-loss")).unwrap();
        fs::create_dir_all(dir.join("playoffs")).unwrap();
        SeasonStore::new(dir)
    }

    #[test]
    fn reads_standings_sorted_by_team() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = store_with(dir.path());
        fs::write(
            store.win_loss_path(Season::new(2012)),
            ",0,1\nNew Jersey Nets,22,44\nBoston Celtics*,39,27\n",
        )?;

        let wl = store.win_loss(Season::new(2012))?;
        let teams: Vec<&str> = wl.keys().map(String::as_str).collect();
        assert_eq!(teams, vec!["Boston Celtics", "New Jersey Nets"]);
        assert_eq!(wl["Boston Celtics"], WinLoss { wins: 39, losses: 27 });
        Ok(())
    }

    #[test]
    fn reads_counts_and_game_records() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = store_with(dir.path());
        fs::write(
            store.playoff_path(Season::new(2019)),
            "Team,Series\nToronto Raptors*,16-8\nMilwaukee Bucks,2\nOrlando Magic,1-4\n",
        )?;

        let adv = store.playoff_advancement(Season::new(2019))?;
        assert_eq!(adv["Toronto Raptors"], 4);
        assert_eq!(adv["Milwaukee Bucks"], 2);
        assert_eq!(adv["Orlando Magic"], 0);
        Ok(())
    }

    #[test]
    fn out_of_range_rounds_are_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = store_with(dir.path());
        fs::write(
            store.playoff_path(Season::new(2019)),
            "Team,Series\nToronto Raptors,5\n",
        )?;
        assert!(matches!(
            store.playoff_advancement(Season::new(2019)),
            Err(AnalysisError::SchemaViolation { .. })
        ));
        Ok(())
    }

    #[test]
    fn missing_standings_are_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let store = SeasonStore::new(dir.path());
        assert!(matches!(
            store.win_loss(Season::new(2014)),
            Err(AnalysisError::MissingSource { .. })
        ));
    }
}
