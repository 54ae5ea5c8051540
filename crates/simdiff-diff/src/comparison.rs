//! Four-granularity comparison of two aggregate views.

use serde::Serialize;
use simdiff_aggregate::AggregateView;
use simdiff_types::Amount;
use tracing::debug;

use crate::entry::{DiffEntry, DiffKey};
use crate::map_diff::{diff_map, diff_nested_map, diff_scalar};

/// Everything that differs between a master and a branch view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub master_total: Amount,
    pub branch_total: Amount,
    /// Grand-total entry, present only when the totals differ.
    pub total: Option<DiffEntry>,
    pub by_agent: Vec<DiffEntry>,
    pub by_agent_year: Vec<DiffEntry>,
    pub by_year: Vec<DiffEntry>,
}

impl ComparisonReport {
    /// Returns `true` if the two views agree at every granularity.
    pub fn is_empty(&self) -> bool {
        self.total.is_none()
            && self.by_agent.is_empty()
            && self.by_agent_year.is_empty()
            && self.by_year.is_empty()
    }

    /// Number of diff entries across all granularities.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// `branch_total - master_total`, zero when the totals agree.
    pub fn total_delta(&self) -> Amount {
        self.branch_total - self.master_total
    }

    /// All entries: total first, then agents, agent-years and years.
    pub fn entries(&self) -> impl Iterator<Item = &DiffEntry> {
        self.total
            .iter()
            .chain(&self.by_agent)
            .chain(&self.by_agent_year)
            .chain(&self.by_year)
    }

    /// Number of entries where the branch raised the amount.
    pub fn increases(&self) -> usize {
        self.entries().filter(|e| e.is_increase()).count()
    }

    /// Number of entries where the branch lowered the amount.
    pub fn decreases(&self) -> usize {
        self.entries().filter(|e| e.is_decrease()).count()
    }
}

/// Compare master and branch views at all four granularities.
///
/// Each pass is independent; they share nothing beyond the two views.
pub fn compare(master: &AggregateView, branch: &AggregateView) -> ComparisonReport {
    let total = diff_scalar(master.total, branch.total);
    let by_agent = diff_map(&master.by_agent, &branch.by_agent, |agent| DiffKey::Agent {
        agent: agent.to_string(),
    });
    let by_agent_year = diff_nested_map(&master.by_agent_year, &branch.by_agent_year);
    let by_year = diff_map(&master.by_year, &branch.by_year, |year| DiffKey::Year {
        year: year.to_string(),
    });

    debug!(
        total_differs = total.is_some(),
        agents = by_agent.len(),
        agent_years = by_agent_year.len(),
        years = by_year.len(),
        "compared aggregate views"
    );

    ComparisonReport {
        master_total: master.total,
        branch_total: branch.total,
        total,
        by_agent,
        by_agent_year,
        by_year,
    }
}
