// src/analysis/wins.rs

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::aggregate::stat_across_years;
use super::stats::{pearson, round_to};
use crate::error::{AnalysisError, Result};
use crate::reconcile::{join, JoinReport};
use crate::schema::Stat;
use crate::season::{Season, SeasonKind};
use crate::source::SeasonStore;

/// How well one regular-season stat tracks winning, season by season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinCorrelation {
    pub stat: Stat,
    pub r_squared: BTreeMap<Season, f64>,
    pub joins: BTreeMap<Season, JoinReport>,
}

/// One team in the wins-vs-stat scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinPoint {
    pub team: String,
    pub win_fraction: f64,
    pub value: f64,
}

/// Share of the season's games each team won, to two decimals, keyed by
/// current team name.
#[tracing::instrument(level = "debug", skip(store))]
pub fn win_fractions(store: &SeasonStore, season: Season) -> Result<BTreeMap<String, f64>> {
    let games = store
        .season_summary(season, SeasonKind::Regular)?
        .games_played;
    if games == 0 {
        return Err(AnalysisError::InsufficientData {
            context: format!("games played in {season}"),
            needed: 1,
            found: 0,
        });
    }

    let fractions: BTreeMap<String, f64> = store
        .win_loss(season)?
        .into_iter()
        .map(|(team, wl)| (team, round_to(f64::from(wl.wins) / f64::from(games), 2)))
        .collect();
    Ok(store.names().reconcile(fractions))
}

/// r² of win fraction against `stat` for every configured season.
#[tracing::instrument(level = "info", skip(store))]
pub fn win_stat_correlation(store: &SeasonStore, stat: Stat) -> Result<WinCorrelation> {
    let table = stat_across_years(store, stat, SeasonKind::Regular)?;
    let mut out = WinCorrelation {
        stat,
        r_squared: BTreeMap::new(),
        joins: BTreeMap::new(),
    };

    for season in store.seasons() {
        let wins = win_fractions(store, season)?;
        let values = table.column(&season);
        let (points, report) = paired(&wins, &values);
        let report = report.check(
            store.config().strict_joins,
            &format!("win-loss {season}"),
        )?;

        let (xs, ys): (Vec<f64>, Vec<f64>) =
            points.iter().map(|p| (p.win_fraction, p.value)).unzip();
        let r = pearson(&xs, &ys).ok_or_else(|| AnalysisError::InsufficientData {
            context: format!("win correlation {season} {stat}"),
            needed: 2,
            found: points.len(),
        })?;
        debug!(%season, r, pairs = points.len(), "correlated");

        out.r_squared.insert(season, r * r);
        out.joins.insert(season, report);
    }

    info!(%stat, seasons = out.r_squared.len(), "win correlation done");
    Ok(out)
}

/// The joined points behind one season's r², for the scatter plot.
pub fn win_stat_pairs(
    store: &SeasonStore,
    season: Season,
    stat: Stat,
) -> Result<(Vec<WinPoint>, JoinReport)> {
    let wins = win_fractions(store, season)?;
    let values: BTreeMap<String, f64> = store.names().reconcile(
        store
            .full_season(season, SeasonKind::Regular)?
            .into_iter()
            .map(|r| (r.team.clone(), r.value(stat)))
            .collect(),
    );
    let (points, report) = paired(&wins, &values);
    let report = report.check(
        store.config().strict_joins,
        &format!("win-loss {season}"),
    )?;
    Ok((points, report))
}

fn paired(
    wins: &BTreeMap<String, f64>,
    values: &BTreeMap<String, f64>,
) -> (Vec<WinPoint>, JoinReport) {
    let (rows, report) = join(wins, values);
    let points = rows
        .into_iter()
        .map(|(team, win_fraction, value)| WinPoint {
            team: team.to_string(),
            win_fraction: *win_fraction,
            value: *value,
        })
        .collect();
    (points, report)
}
