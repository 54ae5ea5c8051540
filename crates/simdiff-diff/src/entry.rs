//! Diff entries: one disagreeing comparison key.

use std::fmt;

use serde::Serialize;
use simdiff_types::Amount;

/// What a diff entry is keyed on.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "granularity", rename_all = "snake_case")]
pub enum DiffKey {
    /// The grand total.
    Total,
    /// One agent across all years.
    Agent { agent: String },
    /// One year across all agents.
    Year { year: String },
    /// One agent in one year.
    AgentYear { agent: String, year: String },
}

impl fmt::Display for DiffKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffKey::Total => write!(f, "total"),
            DiffKey::Agent { agent } => write!(f, "{agent}"),
            DiffKey::Year { year } => write!(f, "{year}"),
            DiffKey::AgentYear { agent, year } => write!(f, "{agent} ({year})"),
        }
    }
}

/// A key whose master and branch amounts differ.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    #[serde(flatten)]
    pub key: DiffKey,
    pub master: Amount,
    pub branch: Amount,
    /// `branch - master`.
    pub delta: Amount,
}

impl DiffEntry {
    /// Build an entry if `master` and `branch` differ; `None` if equal.
    pub fn compare(key: DiffKey, master: Amount, branch: Amount) -> Option<Self> {
        (master != branch).then(|| Self {
            key,
            master,
            branch,
            delta: branch - master,
        })
    }

    /// The branch raised the amount.
    pub fn is_increase(&self) -> bool {
        self.delta.is_positive()
    }

    /// The branch lowered the amount.
    pub fn is_decrease(&self) -> bool {
        self.delta.is_negative()
    }
}
