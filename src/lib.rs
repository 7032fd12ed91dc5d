pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod process;
pub mod reconcile;
pub mod schema;
pub mod season;
pub mod source;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::Config;
pub use error::{AnalysisError, Result};
pub use reconcile::{JoinReport, NameTable};
pub use schema::{SeasonRecord, Stat};
pub use season::{Season, SeasonKind};
pub use source::SeasonStore;
