// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

use crate::season::{Season, SeasonKind};

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;

/// Every failure the pipeline can surface. Nothing here is retried: the
/// source tables are static, so a failed read fails the same way twice.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no {kind} source for season {season} at `{}`", path.display())]
    MissingSource {
        season: Season,
        kind: SeasonKind,
        path: PathBuf,
    },

    #[error("no source table at `{}`", path.display())]
    MissingTable { path: PathBuf },

    #[error("schema violation in `{table}`: {detail}")]
    SchemaViolation { table: String, detail: String },

    #[error("{context}: unresolved team names {names:?}")]
    UnresolvedIdentity { context: String, names: Vec<String> },

    #[error("no teams won {round} playoff round(s) in {season}")]
    EmptyBucket { season: Season, round: u8 },

    #[error("{context}: need at least {needed} samples, found {found}")]
    InsufficientData {
        context: String,
        needed: usize,
        found: usize,
    },

    #[error("unknown stat `{name}` (expected one of: {})", valid.join(", "))]
    UnknownStat {
        name: String,
        valid: Vec<&'static str>,
    },

    #[error("invalid season `{0}`")]
    InvalidSeason(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl AnalysisError {
    pub(crate) fn schema(table: impl Into<String>, detail: impl Into<String>) -> Self {
        AnalysisError::SchemaViolation {
            table: table.into(),
            detail: detail.into(),
        }
    }
}
