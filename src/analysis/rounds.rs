// src/analysis/rounds.rs

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use super::stats::mean;
use crate::error::{AnalysisError, Result};
use crate::reconcile::{join, JoinReport};
use crate::schema::{SeasonRecord, Stat};
use crate::season::{Season, SeasonKind};
use crate::source::standings::MAX_ROUNDS;
use crate::source::SeasonStore;

/// Teams that won the same number of playoff series, and their average
/// shot profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundBucket {
    pub rounds_won: u8,
    pub teams: Vec<String>,
    pub mean_a: f64,
    pub mean_b: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundProfile {
    pub season: Season,
    pub kind: SeasonKind,
    pub stat_a: Stat,
    pub stat_b: Stat,
    /// Indexed by rounds won, `0..=4`.
    pub buckets: Vec<RoundBucket>,
    pub joins: JoinReport,
}

impl RoundProfile {
    pub fn bucket(&self, rounds_won: u8) -> Option<&RoundBucket> {
        self.buckets.get(rounds_won as usize)
    }
}

/// 3-point attempt share and 3-point make rate by rounds won.
pub fn playoff_round_profile(
    store: &SeasonStore,
    season: Season,
    kind: SeasonKind,
) -> Result<RoundProfile> {
    playoff_round_profile_for(store, season, kind, Stat::Attempted3P, Stat::Made3P)
}

/// Average `stat_a` and `stat_b` of the teams in each rounds-won bucket,
/// taking the stats from the `kind` table of `season`.
#[tracing::instrument(level = "info", skip(store))]
pub fn playoff_round_profile_for(
    store: &SeasonStore,
    season: Season,
    kind: SeasonKind,
    stat_a: Stat,
    stat_b: Stat,
) -> Result<RoundProfile> {
    let names = store.names();
    let advancement = names.reconcile(store.playoff_advancement(season)?);
    let records: BTreeMap<String, SeasonRecord> = names.reconcile(
        store
            .full_season(season, kind)?
            .into_iter()
            .map(|r| (r.team.clone(), r))
            .collect(),
    );

    let (joined, report) = join(&advancement, &records);
    // lottery teams are expected in the regular-season table
    let report = if kind.is_playoffs() {
        report
    } else {
        report.left_only()
    };
    let joins = report.check(
        store.config().strict_joins,
        &format!("playoff rounds {season} {kind}"),
    )?;

    let mut grouped: Vec<Vec<(&str, &SeasonRecord)>> = vec![Vec::new(); MAX_ROUNDS as usize + 1];
    for (team, rounds, record) in joined {
        grouped[*rounds as usize].push((team, record));
    }

    let mut buckets = Vec::with_capacity(grouped.len());
    for (round, members) in grouped.into_iter().enumerate() {
        let round = round as u8;
        let a: Vec<f64> = members.iter().map(|(_, r)| r.value(stat_a)).collect();
        let b: Vec<f64> = members.iter().map(|(_, r)| r.value(stat_b)).collect();
        let (Some(mean_a), Some(mean_b)) = (mean(&a), mean(&b)) else {
            return Err(AnalysisError::EmptyBucket { season, round });
        };
        buckets.push(RoundBucket {
            rounds_won: round,
            teams: members.iter().map(|(t, _)| t.to_string()).collect(),
            mean_a,
            mean_b,
        });
    }

    info!(%season, %kind, teams = joins.matched, "built round profile");
    Ok(RoundProfile {
        season,
        kind,
        stat_a,
        stat_b,
        buckets,
        joins,
    })
}
