// src/analysis/edge.rs
//! The "edge case" playoff metric.
//!
//! Rank a season's teams by one regular-season stat. Every playoff team
//! among the highest `n` scores +1, every playoff team among the lowest `n`
//! scores -1. A strongly positive season means the stat separated playoff
//! teams from the rest; a negative one means teams at the wrong end of it
//! got in anyway.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::config::TopSlice;
use crate::error::{AnalysisError, Result};
use crate::reconcile::join;
use crate::schema::Stat;
use crate::season::{Season, SeasonKind};
use crate::source::SeasonStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeCaseRow {
    pub season: Season,
    pub metric: i32,
    /// Extreme-ranked teams that made the playoffs.
    pub qualifying: u32,
}

/// One row per configured season, in season order.
#[tracing::instrument(level = "info", skip(store))]
pub fn edge_case_metric(store: &SeasonStore, stat: Stat) -> Result<Vec<EdgeCaseRow>> {
    let seasons: Vec<Season> = store.seasons().collect();
    seasons
        .par_iter()
        .map(|&season| edge_case_for_season(store, season, stat))
        .collect()
}

pub fn edge_case_for_season(
    store: &SeasonStore,
    season: Season,
    stat: Stat,
) -> Result<EdgeCaseRow> {
    let settings = &store.config().edge_case;
    let n = settings.extremes;
    let names = store.names();

    // table-row order, so equal values keep the order the source lists them in
    let rows: Vec<(String, f64)> = store
        .full_season(season, SeasonKind::Regular)?
        .into_iter()
        .map(|r| (names.canonical(&r.team).to_string(), r.value(stat)))
        .collect();
    if rows.len() / 2 < n {
        return Err(AnalysisError::InsufficientData {
            context: format!("edge case {season}"),
            needed: n.saturating_mul(2),
            found: rows.len(),
        });
    }

    let advancement = names.reconcile(store.playoff_advancement(season)?);
    let values: BTreeMap<String, f64> = rows.iter().cloned().collect();
    let (_, report) = join(&advancement, &values);
    report.left_only().check(
        store.config().strict_joins,
        &format!("playoff teams {season}"),
    )?;
    let playoffs: BTreeSet<&str> = advancement.keys().map(String::as_str).collect();

    let mut ranked: Vec<(&str, f64)> = rows.iter().map(|(t, v)| (t.as_str(), *v)).collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let len = ranked.len();
    let bottom = &ranked[..n];
    let top: Vec<(&str, f64)> = match settings.top_slice {
        TopSlice::Intended => ranked[len - n..].to_vec(),
        TopSlice::HistoricalParity => ranked[len - n..len - 1]
            .iter()
            .copied()
            .chain(std::iter::once(ranked[0]))
            .collect(),
    };

    let mut row = EdgeCaseRow {
        season,
        metric: 0,
        qualifying: 0,
    };
    for ((low, _), (high, _)) in bottom.iter().zip(&top) {
        if playoffs.contains(low) {
            row.metric -= 1;
            row.qualifying += 1;
        }
        if playoffs.contains(high) {
            row.metric += 1;
            row.qualifying += 1;
        }
    }

    debug!(%season, %stat, metric = row.metric, qualifying = row.qualifying, "edge case");
    Ok(row)
}
