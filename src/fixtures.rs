//! Scraped-table writers shared by the unit tests.

use std::{fmt::Write as _, fs, io, path::Path};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Config;
use crate::season::{Season, SeasonKind};

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,shotchart=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// The values a test cares about for one team row; every other column is
/// filled with a plausible constant.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamLine {
    pub name: String,
    pub rank: u32,
    pub games: u32,
    pub field_goal_pct: f64,
    pub attempted_3p: f64,
    pub made_3p: f64,
}

pub fn team(name: &str, attempted_3p: f64, made_3p: f64) -> TeamLine {
    TeamLine {
        name: name.to_string(),
        rank: 0,
        games: 82,
        field_goal_pct: 0.455,
        attempted_3p,
        made_3p,
    }
}

/// Current names of the thirty franchises.
pub const FRANCHISES: [&str; 30] = [
    "Atlanta Hawks",
    "Boston Celtics",
    "Brooklyn Nets",
    "Charlotte Hornets",
    "Chicago Bulls",
    "Cleveland Cavaliers",
    "Dallas Mavericks",
    "Denver Nuggets",
    "Detroit Pistons",
    "Golden State Warriors",
    "Houston Rockets",
    "Indiana Pacers",
    "Los Angeles Clippers",
    "Los Angeles Lakers",
    "Memphis Grizzlies",
    "Miami Heat",
    "Milwaukee Bucks",
    "Minnesota Timberwolves",
    "New Orleans Pelicans",
    "New York Knicks",
    "Oklahoma City Thunder",
    "Orlando Magic",
    "Philadelphia 76ers",
    "Phoenix Suns",
    "Portland Trail Blazers",
    "Sacramento Kings",
    "San Antonio Spurs",
    "Toronto Raptors",
    "Utah Jazz",
    "Washington Wizards",
];

/// Franchise names as the source spelled them in `season`.
pub fn names_in(season: Season) -> Vec<String> {
    let year = season.year();
    FRANCHISES
        .iter()
        .map(|name| match *name {
            "Brooklyn Nets" if year <= 2012 => "New Jersey Nets",
            "Charlotte Hornets" if year <= 2014 => "Charlotte Bobcats",
            "New Orleans Pelicans" if year <= 2013 => "New Orleans Hornets",
            other => other,
        })
        .map(str::to_string)
        .collect()
}

/// `n` teams with steadily rising 3-point numbers.
pub fn teams(n: usize, attempted_start: f64, made_start: f64) -> Vec<TeamLine> {
    FRANCHISES
        .iter()
        .cycle()
        .take(n)
        .enumerate()
        .map(|(i, name)| {
            let name = if i < FRANCHISES.len() {
                name.to_string()
            } else {
                format!("{name} {i}")
            };
            let mut line = team(
                &name,
                attempted_start + 0.005 * i as f64,
                made_start + 0.001 * i as f64,
            );
            line.rank = i as u32 + 1;
            line
        })
        .collect()
}

/// Index of the first playoff team in [`league_teams`]; teams at or past it
/// are the sixteen with the best records.
pub const FIRST_PLAYOFF_INDEX: usize = 14;

/// Series won by the team at league index `i`.
pub fn rounds_for_index(i: usize) -> Option<u8> {
    match i {
        29 => Some(4),
        28 => Some(3),
        26 | 27 => Some(2),
        22..=25 => Some(1),
        14..=21 => Some(0),
        _ => None,
    }
}

/// A full league for one season. Wins rise with the index, as does the
/// 3-point attempt share.
pub fn league_teams(season: Season, kind: SeasonKind) -> Vec<TeamLine> {
    let drift = 0.01 * f64::from(season.year() - 2010);
    names_in(season)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !kind.is_playoffs() || *i >= FIRST_PLAYOFF_INDEX)
        .map(|(i, name)| {
            let marked = if i >= FIRST_PLAYOFF_INDEX {
                format!("{name}*")
            } else {
                name
            };
            let bump = if kind.is_playoffs() { 0.01 } else { 0.0 };
            let mut line = team(
                &marked,
                0.200 + 0.005 * i as f64 + drift + bump,
                0.330 + 0.001 * ((i * 7) % 30) as f64,
            );
            line.rank = i as u32 + 1;
            if kind.is_playoffs() {
                line.games = 4 + rounds_for_index(i).unwrap_or(0) as u32 * 5;
            }
            line
        })
        .collect()
}

pub fn wins_for_index(i: usize) -> u32 {
    20 + i as u32
}

/// A scraped shooting table in the scraper's layout, with `extra_columns`
/// unused columns on the right.
pub fn shooting_csv(teams: &[TeamLine], extra_columns: usize) -> String {
    let width = 19 + extra_columns;
    let mut out = String::new();

    // positional column labels
    let labels: Vec<String> = std::iter::once(String::new())
        .chain((0..width - 1).map(|i| i.to_string()))
        .collect();
    writeln!(out, "{}", labels.join(",")).unwrap();

    let mut grouping = vec![String::new(); width];
    grouping[0] = "0".into();
    grouping[7] = "% of FGA by Distance".into();
    grouping[13] = "FG% by Distance".into();
    writeln!(out, "{}", grouping.join(",")).unwrap();

    let mut header: Vec<String> = [
        "1", "Rk", "Team", "G", "MP", "FG%", "Dist.", "2P", "0-3", "3-10", "10-16", "16-3P",
        "3P", "2P", "0-3", "3-10", "10-16", "16-3P", "3P",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    header.extend((0..extra_columns).map(|i| format!("Unnamed: {i}")));
    writeln!(out, "{}", header.join(",")).unwrap();

    for (i, t) in teams.iter().enumerate() {
        write_row(&mut out, i + 2, &t.rank.to_string(), t, extra_columns);
    }

    let n = teams.len().max(1) as f64;
    let mut average = team(
        "League Average",
        teams.iter().map(|t| t.attempted_3p).sum::<f64>() / n,
        teams.iter().map(|t| t.made_3p).sum::<f64>() / n,
    );
    average.games = teams.first().map(|t| t.games).unwrap_or(82);
    write_row(&mut out, teams.len() + 2, "0", &average, extra_columns);
    out
}

fn write_row(out: &mut String, idx: usize, rank: &str, t: &TeamLine, extra_columns: usize) {
    let mut cells: Vec<String> = vec![
        idx.to_string(),
        rank.to_string(),
        t.name.clone(),
        t.games.to_string(),
        (t.games * 241).to_string(),
        t.field_goal_pct.to_string(),
        "13.5".into(),
        (1.0 - t.attempted_3p).to_string(),
        "0.3".into(),
        "0.15".into(),
        "0.08".into(),
        "0.17".into(),
        t.attempted_3p.to_string(),
        "0.5".into(),
        "0.63".into(),
        "0.4".into(),
        "0.41".into(),
        "0.4".into(),
        t.made_3p.to_string(),
    ];
    cells.extend((0..extra_columns).map(|_| "1.0".to_string()));
    writeln!(out, "{}", cells.join(",")).unwrap();
}

pub fn write_shooting(
    dir: &Path,
    season: Season,
    kind: SeasonKind,
    teams: &[TeamLine],
) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join(kind.file_name(season)), shooting_csv(teams, 2))
}

pub fn write_win_loss(dir: &Path, season: Season, records: &[(&str, u32, u32)]) -> io::Result<()> {
    let config = Config::default();
    let wl_dir = dir.join(&config.win_loss_dir);
    fs::create_dir_all(&wl_dir)?;
    let mut out = String::from(",0,1\n");
    for (team, wins, losses) in records {
        writeln!(out, "{team},{wins},{losses}").unwrap();
    }
    fs::write(wl_dir.join(format!("all_records_{season}.csv")), out)
}

pub fn write_advancement(dir: &Path, season: Season, rounds: &[(&str, u8)]) -> io::Result<()> {
    let config = Config::default();
    let po_dir = dir.join(&config.playoffs_dir);
    fs::create_dir_all(&po_dir)?;
    let mut out = String::from("Team,Series\n");
    for (team, won) in rounds {
        writeln!(out, "{team},{won}").unwrap();
    }
    fs::write(po_dir.join(format!("series_won_{season}.csv")), out)
}

/// Every table the store reads, for each of `seasons`.
pub fn write_league(dir: &Path, seasons: impl IntoIterator<Item = Season>) -> io::Result<()> {
    let config = Config::default();
    let mut efg = String::from(",Year,eFG%\n");
    let mut efg_row = 0;

    for season in seasons {
        for kind in [SeasonKind::Regular, SeasonKind::Playoffs] {
            write_shooting(dir, season, kind, &league_teams(season, kind))?;
        }

        let names = names_in(season);
        let standings: Vec<(&str, u32, u32)> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), wins_for_index(i), 82 - wins_for_index(i)))
            .collect();
        write_win_loss(dir, season, &standings)?;

        let rounds: Vec<(&str, u8)> = names
            .iter()
            .enumerate()
            .filter_map(|(i, n)| rounds_for_index(i).map(|r| (n.as_str(), r)))
            .collect();
        write_advancement(dir, season, &rounds)?;

        for i in 0..30 {
            writeln!(efg, "{efg_row},{season},{}", 0.48 + 0.001 * i as f64).unwrap();
            efg_row += 1;
        }
    }

    let efg_path = dir.join(&config.efg_file);
    if let Some(parent) = efg_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(efg_path, efg)
}
