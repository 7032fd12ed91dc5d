// src/process/normalize.rs

use std::collections::HashSet;
use tracing::debug;

use super::utils::{clean_str, clean_team, is_blank, parse_count, parse_number};
use super::RawTable;
use crate::error::{AnalysisError, Result};
use crate::schema::{SeasonRecord, Stat, CANONICAL_WIDTH, TEAM_COLUMN};

/// Rows 0 and 1 of every scraped table are headers.
const HEADER_ROWS: usize = 2;

/// Which rows of a scraped table to turn into records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowPolicy {
    /// Everything between the header rows and the trailing league-average row.
    TeamRows,
    /// Only the trailing league-average row.
    SummaryRow,
}

/// Map a scraped shooting table onto the canonical schema.
///
/// Row 1 is the real column header and must name `Team` in column 2; if it
/// does not, the source reordered its columns and nothing after this point
/// could be trusted. Every kept row must carry all 18 canonical fields.
pub fn normalize(raw: &RawTable, policy: RowPolicy) -> Result<Vec<SeasonRecord>> {
    let header = raw
        .rows
        .get(1)
        .ok_or_else(|| AnalysisError::schema(&raw.name, "missing column header row"))?;
    let team_header = header.get(TEAM_COLUMN).map(|c| clean_str(c)).unwrap_or_default();
    if team_header != "Team" {
        return Err(AnalysisError::schema(
            &raw.name,
            format!("expected `Team` header in column {TEAM_COLUMN}, found `{team_header}`"),
        ));
    }

    if raw.rows.len() <= HEADER_ROWS {
        return Err(AnalysisError::schema(&raw.name, "no league summary row"));
    }
    let last = raw.rows.len() - 1;

    let records = match policy {
        RowPolicy::TeamRows => {
            let mut seen = HashSet::new();
            let mut out = Vec::with_capacity(last - HEADER_ROWS);
            for (idx, row) in raw.rows.iter().enumerate().take(last).skip(HEADER_ROWS) {
                if is_blank(row) || is_repeated_header(row) {
                    debug!(table = %raw.name, idx, "skipping decorative row");
                    continue;
                }
                let record = parse_row(&raw.name, idx, row)?;
                if !seen.insert(record.team.clone()) {
                    return Err(AnalysisError::schema(
                        &raw.name,
                        format!("row {idx}: team `{}` listed twice", record.team),
                    ));
                }
                out.push(record);
            }
            out
        }
        RowPolicy::SummaryRow => vec![parse_row(&raw.name, last, &raw.rows[last])?],
    };

    debug!(table = %raw.name, ?policy, records = records.len(), "normalized");
    Ok(records)
}

fn is_repeated_header(row: &[String]) -> bool {
    row.get(TEAM_COLUMN).is_some_and(|c| clean_str(c) == "Team")
}

fn parse_row(table: &str, idx: usize, row: &[String]) -> Result<SeasonRecord> {
    if row.len() < CANONICAL_WIDTH {
        return Err(AnalysisError::schema(
            table,
            format!(
                "row {idx}: {} columns, need at least {CANONICAL_WIDTH}",
                row.len()
            ),
        ));
    }

    let team = clean_team(&row[TEAM_COLUMN]);
    if team.is_empty() {
        return Err(AnalysisError::schema(table, format!("row {idx}: empty `Team`")));
    }

    let count = |stat: Stat| -> Result<u32> {
        parse_count(&row[stat.raw_column()]).ok_or_else(|| bad_cell(table, idx, stat, row))
    };
    let num = |stat: Stat| -> Result<f64> {
        parse_number(&row[stat.raw_column()]).ok_or_else(|| bad_cell(table, idx, stat, row))
    };

    Ok(SeasonRecord {
        rank: count(Stat::Rank)?,
        team,
        games_played: count(Stat::GamesPlayed)?,
        minutes_played: num(Stat::MinutesPlayed)?,
        field_goal_pct: num(Stat::FieldGoalPercent)?,
        average_distance: num(Stat::AverageDistance)?,
        attempted_2p: num(Stat::Attempted2P)?,
        attempted_0_3: num(Stat::Attempted0To3)?,
        attempted_3_10: num(Stat::Attempted3To10)?,
        attempted_10_16: num(Stat::Attempted10To16)?,
        attempted_16_plus: num(Stat::Attempted16Plus)?,
        attempted_3p: num(Stat::Attempted3P)?,
        made_2p: num(Stat::Made2P)?,
        made_0_3: num(Stat::Made0To3)?,
        made_3_10: num(Stat::Made3To10)?,
        made_10_16: num(Stat::Made10To16)?,
        made_16_plus: num(Stat::Made16Plus)?,
        made_3p: num(Stat::Made3P)?,
    })
}

fn bad_cell(table: &str, idx: usize, stat: Stat, row: &[String]) -> AnalysisError {
    AnalysisError::schema(
        table,
        format!(
            "row {idx}: `{}` is empty or not a number (`{}`)",
            stat,
            row[stat.raw_column()]
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, TeamLine};
    use crate::process::read_raw_table;
    use anyhow::Result;
    use std::io::Cursor;

    fn raw(teams: &[TeamLine], extra_columns: usize) -> RawTable {
        let csv = fixtures::shooting_csv(teams, extra_columns);
        read_raw_table("fixture.csv", Cursor::new(csv)).unwrap()
    }

    #[test]
    fn keeps_team_rows_and_strips_marker() -> Result<()> {
        let mut teams = fixtures::teams(3, 0.30, 0.36);
        teams[0].name = "Miami Heat*".into();
        let records = normalize(&raw(&teams, 0), RowPolicy::TeamRows)?;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].team, "Miami Heat");
        assert_eq!(records[0].rank, 1);
        assert_eq!(records[2].games_played, 82);
        assert!((records[0].attempted_3p - teams[0].attempted_3p).abs() < 1e-12);
        assert!((records[0].made_3p - teams[0].made_3p).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn summary_policy_keeps_only_last_row() -> Result<()> {
        let teams = fixtures::teams(5, 0.30, 0.36);
        let records = normalize(&raw(&teams, 0), RowPolicy::SummaryRow)?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].team, "League Average");
        assert_eq!(records[0].games_played, 82);
        Ok(())
    }

    #[test]
    fn tolerates_extra_trailing_columns() -> Result<()> {
        let teams = fixtures::teams(4, 0.30, 0.36);
        let narrow = normalize(&raw(&teams, 0), RowPolicy::TeamRows)?;
        let wide = normalize(&raw(&teams, 5), RowPolicy::TeamRows)?;
        assert_eq!(narrow, wide);
        Ok(())
    }

    #[test]
    fn skips_blank_and_repeated_header_rows() -> Result<()> {
        let teams = fixtures::teams(2, 0.30, 0.36);
        let mut table = raw(&teams, 0);
        let header = table.rows[1].clone();
        table.rows.insert(3, header);
        table.rows.insert(4, vec![String::new(); 20]);

        let records = normalize(&table, RowPolicy::TeamRows)?;
        assert_eq!(records.len(), 2);
        Ok(())
    }

    #[test]
    fn empty_cell_is_schema_violation() {
        let teams = fixtures::teams(3, 0.30, 0.36);
        let mut table = raw(&teams, 0);
        table.rows[3][Stat::Made3P.raw_column()] = String::new();

        let err = normalize(&table, RowPolicy::TeamRows).unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaViolation { .. }));
        assert!(err.to_string().contains("Field_Goals_3P"));
    }

    #[test]
    fn reordered_columns_are_rejected() {
        let teams = fixtures::teams(3, 0.30, 0.36);
        let mut table = raw(&teams, 0);
        table.rows[1].swap(2, 3);

        let err = normalize(&table, RowPolicy::TeamRows).unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaViolation { .. }));
    }

    #[test]
    fn narrow_rows_are_rejected() {
        let teams = fixtures::teams(3, 0.30, 0.36);
        let mut table = raw(&teams, 0);
        table.rows[2].truncate(10);
        assert!(normalize(&table, RowPolicy::TeamRows).is_err());
    }

    #[test]
    fn duplicate_team_is_rejected() {
        let mut teams = fixtures::teams(3, 0.30, 0.36);
        teams[1].name = format!("{}*", teams[0].name);
        let err = normalize(&raw(&teams, 0), RowPolicy::TeamRows).unwrap_err();
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn normalizing_twice_is_identical() -> Result<()> {
        let teams = fixtures::teams(30, 0.25, 0.40);
        let table = raw(&teams, 3);
        let first = normalize(&table, RowPolicy::TeamRows)?;
        let second = normalize(&table, RowPolicy::TeamRows)?;
        assert_eq!(first, second);
        Ok(())
    }
}
