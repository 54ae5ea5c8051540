//! Scalar, map and nested-map comparisons.
//!
//! Maps are compared over the union of their keys: a key missing on one side
//! counts as zero there. Keys are visited in ascending order, once each.

use std::collections::{BTreeMap, BTreeSet};

use simdiff_types::Amount;

use crate::entry::{DiffEntry, DiffKey};

/// Compare two grand totals.
pub fn diff_scalar(master: Amount, branch: Amount) -> Option<DiffEntry> {
    DiffEntry::compare(DiffKey::Total, master, branch)
}

/// Compare two flat maps over the union of their keys.
///
/// `make_key` turns a map key into the [`DiffKey`] reported for it, e.g.
/// `|agent| DiffKey::Agent { agent: agent.into() }`.
pub fn diff_map<F>(
    master: &BTreeMap<String, Amount>,
    branch: &BTreeMap<String, Amount>,
    make_key: F,
) -> Vec<DiffEntry>
where
    F: Fn(&str) -> DiffKey,
{
    let keys: BTreeSet<&String> = master.keys().chain(branch.keys()).collect();

    keys.into_iter()
        .filter_map(|key| {
            let m = master.get(key).copied().unwrap_or_default();
            let b = branch.get(key).copied().unwrap_or_default();
            DiffEntry::compare(make_key(key.as_str()), m, b)
        })
        .collect()
}

/// Compare two agent -> year -> amount maps.
///
/// Outer keys are unioned first; for each agent the inner year maps are then
/// compared with [`diff_map`], treating a missing agent as an empty map.
pub fn diff_nested_map(
    master: &BTreeMap<String, BTreeMap<String, Amount>>,
    branch: &BTreeMap<String, BTreeMap<String, Amount>>,
) -> Vec<DiffEntry> {
    let empty = BTreeMap::new();
    let agents: BTreeSet<&String> = master.keys().chain(branch.keys()).collect();

    agents
        .into_iter()
        .flat_map(|agent| {
            let m = master.get(agent).unwrap_or(&empty);
            let b = branch.get(agent).unwrap_or(&empty);
            diff_map(m, b, |year| DiffKey::AgentYear {
                agent: agent.clone(),
                year: year.to_string(),
            })
        })
        .collect()
}
