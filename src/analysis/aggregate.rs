// src/analysis/aggregate.rs
//! Cross-season views: one stat over every season, or every stat for one
//! team.

use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::table::{WideTable, WideTableBuilder};
use crate::error::Result;
use crate::schema::{SeasonRecord, Stat};
use crate::season::{Season, SeasonKind};
use crate::source::SeasonStore;

/// `stat` for every team (rows, reconciled names) in every configured
/// season (columns). Seasons are loaded in parallel and merged by season.
#[tracing::instrument(level = "info", skip(store))]
pub fn stat_across_years(
    store: &SeasonStore,
    stat: Stat,
    kind: SeasonKind,
) -> Result<WideTable<String, Season>> {
    let seasons: Vec<Season> = store.seasons().collect();

    let columns = seasons
        .par_iter()
        .map(|&season| -> Result<(Season, BTreeMap<String, f64>)> {
            let by_team: BTreeMap<String, f64> = store
                .full_season(season, kind)?
                .into_iter()
                .map(|r| (r.team.clone(), r.value(stat)))
                .collect();
            Ok((season, store.names().reconcile(by_team)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut builder = WideTable::builder();
    for (season, cells) in columns {
        builder.merge_column(season, cells);
    }
    let table = builder.build();
    info!(
        teams = table.len(),
        seasons = table.columns().len(),
        "built stat table"
    );
    Ok(table)
}

/// Every stat of `team` for each season whose table lists exactly that
/// name. Seasons without it produce no row.
#[tracing::instrument(level = "info", skip(store))]
pub fn team_across_years(
    store: &SeasonStore,
    team: &str,
    kind: SeasonKind,
) -> Result<WideTable<Season, Stat>> {
    across_years(store, kind, |name| name == team)
}

/// Like [`team_across_years`], but follows the franchise through renames:
/// `Brooklyn Nets` also picks up the `New Jersey Nets` seasons.
#[tracing::instrument(level = "info", skip(store))]
pub fn franchise_across_years(
    store: &SeasonStore,
    team: &str,
    kind: SeasonKind,
) -> Result<WideTable<Season, Stat>> {
    let names = store.names();
    let current = names.canonical(team);
    across_years(store, kind, |name| names.canonical(name) == current)
}

fn across_years<F>(
    store: &SeasonStore,
    kind: SeasonKind,
    matches: F,
) -> Result<WideTable<Season, Stat>>
where
    F: Fn(&str) -> bool,
{
    let mut builder = WideTable::builder();
    for stat in Stat::ALL {
        builder.column(stat);
    }

    for (season, _path) in store.source_files(kind)? {
        let records = store.full_season(season, kind)?;
        let Some(record) = records.iter().find(|r| matches(&r.team)) else {
            debug!(%season, "team not in table");
            continue;
        };
        insert_record(&mut builder, season, record);
    }
    Ok(builder.build())
}

fn insert_record(
    builder: &mut WideTableBuilder<Season, Stat>,
    season: Season,
    record: &SeasonRecord,
) {
    for (stat, value) in record.values() {
        builder.insert(season, stat, value);
    }
}

/// League-average `stat` per configured season, labelled `"09-10"`.
#[tracing::instrument(level = "info", skip(store))]
pub fn league_trend(
    store: &SeasonStore,
    stat: Stat,
    kind: SeasonKind,
) -> Result<Vec<(String, f64)>> {
    store
        .seasons()
        .map(|season| {
            let summary = store.season_summary(season, kind)?;
            Ok((season.label(), summary.value(stat)))
        })
        .collect()
}

/// eFG% values grouped by season, in file order within a season.
pub fn efg_by_season(store: &SeasonStore) -> Result<BTreeMap<Season, Vec<f64>>> {
    let mut out: BTreeMap<Season, Vec<f64>> = BTreeMap::new();
    for record in store.efg()? {
        out.entry(record.season).or_default().push(record.efg);
    }
    Ok(out)
}
