pub mod stat;
pub mod types;

pub use stat::Stat;
pub use types::{SeasonRecord, CANONICAL_WIDTH, TEAM_COLUMN};
