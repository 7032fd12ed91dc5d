// src/reconcile.rs
//! Team identity across renames, and bookkeeping for name-keyed joins.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::{AnalysisError, Result};

/// Franchises that changed name inside the covered seasons.
pub const DEFAULT_RENAMES: &[(&str, &str)] = &[
    ("New Jersey Nets", "Brooklyn Nets"),
    ("Charlotte Bobcats", "Charlotte Hornets"),
    ("New Orleans Hornets", "New Orleans Pelicans"),
];

/// Old name → current name.
///
/// No current name may itself be an old name, so a single rewrite pass
/// always lands on the current name and applying the table twice changes
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    renames: BTreeMap<String, String>,
}

impl Default for NameTable {
    fn default() -> Self {
        Self {
            renames: DEFAULT_RENAMES
                .iter()
                .map(|(old, new)| (old.to_string(), new.to_string()))
                .collect(),
        }
    }
}

impl NameTable {
    /// Build a table from exactly these entries.
    pub fn new<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut renames = BTreeMap::new();
        for (old, new) in entries {
            let (old, new) = (old.trim(), new.trim());
            if old.is_empty() || new.is_empty() || old == new {
                return Err(AnalysisError::Config(format!(
                    "invalid rename `{old}` → `{new}`"
                )));
            }
            if let Some(prev) = renames.insert(old.to_string(), new.to_string()) {
                if prev != new {
                    return Err(AnalysisError::Config(format!(
                        "`{old}` renamed to both `{prev}` and `{new}`"
                    )));
                }
            }
        }
        if let Some(new) = renames.values().find(|new| renames.contains_key(*new)) {
            return Err(AnalysisError::Config(format!(
                "`{new}` is both a current and a historical name"
            )));
        }
        Ok(Self { renames })
    }

    /// The built-in entries plus `extra`.
    pub fn with_extra<'a, I>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        NameTable::new(DEFAULT_RENAMES.iter().copied().chain(extra))
    }

    /// Current name for `name`; names with no entry are returned unchanged.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.renames.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Every historical name that maps to `current`.
    pub fn aliases<'a>(&'a self, current: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.renames
            .iter()
            .filter(move |(_, new)| new.as_str() == current)
            .map(|(old, _)| old.as_str())
    }

    /// Rename every historical key in `map` to its current name.
    ///
    /// If a map somehow carries both the old and the new name, the entry
    /// filed under the old name wins.
    pub fn reconcile<V>(&self, mut map: BTreeMap<String, V>) -> BTreeMap<String, V> {
        for (old, new) in &self.renames {
            if let Some(value) = map.remove(old) {
                if map.insert(new.clone(), value).is_some() {
                    warn!(old = %old, new = %new, "both names present; kept the historical entry");
                }
            }
        }
        map
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

/// Outcome of joining a name-keyed table against a season table.
///
/// `unresolved` holds keys of the driving table that matched no team after
/// reconciliation; `unmatched_right` holds keys of the other table that no
/// driving key reached. Both are dropped from the joined rows and kept here
/// so callers and tests can see them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinReport {
    pub matched: usize,
    pub unresolved: Vec<String>,
    pub unmatched_right: Vec<String>,
}

impl JoinReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.unmatched_right.is_empty()
    }

    /// Forget `unmatched_right`, for joins where the other table is a
    /// superset of the driving one (the playoff list against a full league).
    pub fn left_only(mut self) -> Self {
        self.unmatched_right.clear();
        self
    }

    /// Log dropped names, or turn them into an error when `strict`.
    pub fn check(self, strict: bool, context: &str) -> Result<Self> {
        if self.is_clean() {
            return Ok(self);
        }
        if strict {
            return Err(AnalysisError::UnresolvedIdentity {
                context: context.to_string(),
                names: self
                    .unresolved
                    .into_iter()
                    .chain(self.unmatched_right)
                    .collect(),
            });
        }
        warn!(
            context,
            skipped = self.unresolved.len() + self.unmatched_right.len(),
            left = ?self.unresolved,
            right = ?self.unmatched_right,
            "join skipped unresolved team names"
        );
        Ok(self)
    }
}

/// Inner join of two name-keyed maps, driven by `left`. Keys missing from
/// either side are listed in the report.
pub fn join<'a, A, B>(
    left: &'a BTreeMap<String, A>,
    right: &'a BTreeMap<String, B>,
) -> (Vec<(&'a str, &'a A, &'a B)>, JoinReport) {
    let mut report = JoinReport::default();
    let mut rows = Vec::with_capacity(left.len());
    for (name, a) in left {
        match right.get(name) {
            Some(b) => {
                report.matched += 1;
                rows.push((name.as_str(), a, b));
            }
            None => report.unresolved.push(name.clone()),
        }
    }
    report.unmatched_right = right
        .keys()
        .filter(|name| !left.contains_key(*name))
        .cloned()
        .collect();
    (rows, report)
}
