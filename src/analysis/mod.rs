// src/analysis/mod.rs
//! Everything computed on top of the season tables.

pub mod aggregate;
pub mod edge;
pub mod rounds;
pub mod stats;
pub mod table;
pub mod wins;

pub use aggregate::{
    efg_by_season, franchise_across_years, league_trend, stat_across_years, team_across_years,
};
pub use edge::{edge_case_for_season, edge_case_metric, EdgeCaseRow};
pub use rounds::{playoff_round_profile, playoff_round_profile_for, RoundBucket, RoundProfile};
pub use table::{WideTable, WideTableBuilder};
pub use wins::{win_fractions, win_stat_correlation, win_stat_pairs, WinCorrelation, WinPoint};
