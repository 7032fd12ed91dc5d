use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use shotchart::{
    analysis,
    export::{self, Format},
    Config, Season, SeasonKind, SeasonStore, Stat,
};

/// Shooting-profile tables and analytics over a directory of scraped
/// season tables.
#[derive(Parser, Debug)]
#[command(name = "shotchart", version)]
struct Cli {
    /// YAML config file; every key is optional
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides `data_dir` from the config
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json, global = true)]
    format: Format,

    /// Write here instead of stdout
    #[arg(long, short, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the stat names every other command accepts
    Stats,
    /// Every team row of one season table
    Season {
        #[arg(long)]
        season: Season,
        #[arg(long)]
        playoffs: bool,
    },
    /// The league-average row of one season table
    Summary {
        #[arg(long)]
        season: Season,
        #[arg(long)]
        playoffs: bool,
    },
    /// League average of one stat across seasons
    Trend {
        #[arg(long)]
        stat: Stat,
        #[arg(long)]
        playoffs: bool,
    },
    /// One stat for every team and season
    Stat {
        #[arg(long)]
        stat: Stat,
        #[arg(long)]
        playoffs: bool,
    },
    /// Every stat of one team, season by season
    Team {
        #[arg(long)]
        team: String,
        #[arg(long)]
        playoffs: bool,
        /// Include seasons played under earlier names
        #[arg(long)]
        franchise: bool,
    },
    /// Edge-case playoff metric per season
    Edge {
        #[arg(long)]
        stat: Stat,
    },
    /// Average shot profile by playoff rounds won
    Rounds {
        #[arg(long)]
        season: Season,
        /// Take the stats from the playoff table instead of the regular season
        #[arg(long)]
        playoffs: bool,
        #[arg(long, default_value = "Field_Goals_Attempted_3PA")]
        stat_a: Stat,
        #[arg(long, default_value = "Field_Goals_3P")]
        stat_b: Stat,
    },
    /// r² of win fraction against one stat, per season
    Wins {
        #[arg(long)]
        stat: Stat,
    },
    /// Win fraction and stat value of every team in one season
    Scatter {
        #[arg(long)]
        season: Season,
        #[arg(long)]
        stat: Stat,
    },
    /// eFG% values per season
    Efg,
}

#[derive(Serialize)]
struct RoundRow {
    rounds_won: u8,
    teams: usize,
    mean_a: f64,
    mean_b: f64,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    info!(data_dir = %config.data_dir.display(), "startup");
    let store = SeasonStore::from_config(config).context("invalid configuration")?;

    let out = export::open_output(cli.out.as_deref())
        .with_context(|| format!("opening output {:?}", cli.out))?;
    let kind = SeasonKind::from_playoff_flag;

    match cli.command {
        Command::Stats => {
            let stats: Vec<(&str, &str)> = Stat::ALL
                .iter()
                .map(|s| (s.name(), s.description()))
                .collect();
            emit_records(cli.format, &stats, out)
        }
        Command::Season { season, playoffs } => {
            let records = store
                .full_season(season, kind(playoffs))
                .with_context(|| format!("loading {season}"))?;
            emit_records(cli.format, &records, out)
        }
        Command::Summary { season, playoffs } => {
            let summary = store
                .season_summary(season, kind(playoffs))
                .with_context(|| format!("loading {season} summary"))?;
            emit_records(cli.format, &[summary], out)
        }
        Command::Trend { stat, playoffs } => {
            let trend = analysis::league_trend(&store, stat, kind(playoffs))?;
            emit_records(cli.format, &trend, out)
        }
        Command::Stat { stat, playoffs } => {
            let table = analysis::stat_across_years(&store, stat, kind(playoffs))
                .with_context(|| format!("building {stat} table"))?;
            match cli.format {
                Format::Json => export::write_json(&table, out)?,
                Format::Csv => export::write_wide_csv(&table, out)?,
            }
            Ok(())
        }
        Command::Team {
            team,
            playoffs,
            franchise,
        } => {
            let table = if franchise {
                analysis::franchise_across_years(&store, &team, kind(playoffs))?
            } else {
                analysis::team_across_years(&store, &team, kind(playoffs))?
            };
            if table.is_empty() {
                anyhow::bail!("`{team}` appears in no {} table", kind(playoffs));
            }
            match cli.format {
                Format::Json => export::write_json(&table, out)?,
                Format::Csv => export::write_wide_csv(&table, out)?,
            }
            Ok(())
        }
        Command::Edge { stat } => {
            let rows = analysis::edge_case_metric(&store, stat)
                .with_context(|| format!("edge case for {stat}"))?;
            emit_records(cli.format, &rows, out)
        }
        Command::Rounds {
            season,
            playoffs,
            stat_a,
            stat_b,
        } => {
            let profile =
                analysis::playoff_round_profile_for(&store, season, kind(playoffs), stat_a, stat_b)
                    .with_context(|| format!("round profile for {season}"))?;
            match cli.format {
                Format::Json => export::write_json(&profile, out)?,
                Format::Csv => {
                    let rows: Vec<RoundRow> = profile
                        .buckets
                        .iter()
                        .map(|b| RoundRow {
                            rounds_won: b.rounds_won,
                            teams: b.teams.len(),
                            mean_a: b.mean_a,
                            mean_b: b.mean_b,
                        })
                        .collect();
                    export::write_records_csv(&rows, out)?
                }
            }
            Ok(())
        }
        Command::Wins { stat } => {
            let corr = analysis::win_stat_correlation(&store, stat)
                .with_context(|| format!("correlating wins with {stat}"))?;
            match cli.format {
                Format::Json => export::write_json(&corr, out)?,
                Format::Csv => {
                    let rows: Vec<(Season, f64)> = corr.r_squared.into_iter().collect();
                    export::write_records_csv(&rows, out)?
                }
            }
            Ok(())
        }
        Command::Scatter { season, stat } => {
            let (points, _report) = analysis::win_stat_pairs(&store, season, stat)?;
            emit_records(cli.format, &points, out)
        }
        Command::Efg => {
            let efg = analysis::efg_by_season(&store).context("loading eFG% table")?;
            match cli.format {
                Format::Json => export::write_json(&efg, out)?,
                Format::Csv => {
                    let rows: Vec<(Season, f64)> = efg
                        .into_iter()
                        .flat_map(|(season, values)| values.into_iter().map(move |v| (season, v)))
                        .collect();
                    export::write_records_csv(&rows, out)?
                }
            }
            Ok(())
        }
    }
}

fn emit_records<T: Serialize>(
    format: Format,
    rows: &[T],
    out: Box<dyn std::io::Write>,
) -> Result<()> {
    match format {
        Format::Json => export::write_json(rows, out)?,
        Format::Csv => export::write_records_csv(rows, out)?,
    }
    Ok(())
}
