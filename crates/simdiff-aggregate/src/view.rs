//! The four-shaped aggregate of a dataset.
//!
//! Every contribution is counted exactly once in each of `total`,
//! `by_agent`, `by_year` and `by_agent_year`, so the three maps are
//! partitions of the same sum. Views are built by folding contributions
//! into a fresh value; nothing is mutated once [`aggregate`] returns.

use std::collections::BTreeMap;

use serde::Serialize;
use simdiff_types::{Amount, Dataset};
use tracing::debug;

use crate::contribution::{contributions, Contribution};
use crate::error::{AggregateError, AggregateResult};

/// Aggregated amounts for one dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AggregateView {
    /// Sum of every amount field of every record.
    pub total: Amount,
    /// Agent id -> sum of that agent's amounts.
    pub by_agent: BTreeMap<String, Amount>,
    /// Agent id -> year -> sum.
    pub by_agent_year: BTreeMap<String, BTreeMap<String, Amount>>,
    /// Year -> sum across all agents.
    pub by_year: BTreeMap<String, Amount>,
}

impl AggregateView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no contribution has been recorded.
    pub fn is_empty(&self) -> bool {
        self.by_agent.is_empty()
    }

    /// Fold step: the view with one more contribution added.
    ///
    /// Returns `None` if any of the four sums would leave the representable
    /// amount range.
    pub fn with_contribution(mut self, contribution: &Contribution<'_>) -> Option<Self> {
        let Contribution {
            agent,
            year,
            amount,
            ..
        } = contribution;

        self.total = self.total.checked_add(*amount)?;
        add_to(self.by_agent.entry(agent.to_string()).or_default(), *amount)?;
        add_to(self.by_year.entry(year.to_string()).or_default(), *amount)?;
        add_to(
            self.by_agent_year
                .entry(agent.to_string())
                .or_default()
                .entry(year.to_string())
                .or_default(),
            *amount,
        )?;
        Some(self)
    }

    /// Combine two views into the view of their union.
    ///
    /// Merging is associative and commutative, so partial views over any
    /// split of a dataset reduce to the same result. Returns `None` on
    /// overflow.
    pub fn merge(mut self, other: AggregateView) -> Option<Self> {
        self.total = self.total.checked_add(other.total)?;
        for (agent, amount) in other.by_agent {
            add_to(self.by_agent.entry(agent).or_default(), amount)?;
        }
        for (year, amount) in other.by_year {
            add_to(self.by_year.entry(year).or_default(), amount)?;
        }
        for (agent, years) in other.by_agent_year {
            let target = self.by_agent_year.entry(agent).or_default();
            for (year, amount) in years {
                add_to(target.entry(year).or_default(), amount)?;
            }
        }
        Some(self)
    }

    /// Amount for one agent and year, zero if absent.
    pub fn agent_year(&self, agent: &str, year: &str) -> Amount {
        self.by_agent_year
            .get(agent)
            .and_then(|years| years.get(year))
            .copied()
            .unwrap_or_default()
    }

    /// Check that the three maps partition `total` consistently.
    pub fn is_consistent(&self) -> bool {
        let total = Some(self.total);
        if Amount::checked_sum(self.by_agent.values().copied()) != total
            || Amount::checked_sum(self.by_year.values().copied()) != total
        {
            return false;
        }
        if !self.by_agent.keys().eq(self.by_agent_year.keys()) {
            return false;
        }
        self.by_agent_year.iter().all(|(agent, years)| {
            let per_agent = Amount::checked_sum(years.values().copied());
            self.by_agent.get(agent).copied() == per_agent
        })
    }
}

fn add_to(slot: &mut Amount, amount: Amount) -> Option<()> {
    *slot = slot.checked_add(amount)?;
    Some(())
}

/// Aggregate a dataset into its four views.
///
/// Fails with [`AggregateError::TypeMismatch`] on the first non-numeric
/// amount field and with [`AggregateError::OutOfRange`] when an amount or a
/// running sum leaves the representable range. No partial view is returned.
pub fn aggregate(dataset: &Dataset) -> AggregateResult<AggregateView> {
    let view = dataset
        .iter()
        .enumerate()
        .try_fold(AggregateView::new(), |view, (index, record)| -> AggregateResult<_> {
            contributions(index, record)?
                .iter()
                .try_fold(view, |view, c| {
                    view.with_contribution(c).ok_or_else(|| AggregateError::OutOfRange {
                        record: index,
                        field: c.field.to_string(),
                        value: c.amount.to_string(),
                    })
                })
        })?;

    debug!(
        records = dataset.len(),
        agents = view.by_agent.len(),
        years = view.by_year.len(),
        total = %view.total,
        "aggregated dataset"
    );
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use simdiff_types::Record;

    fn dataset(values: Vec<Value>) -> Dataset {
        values
            .into_iter()
            .map(|v| Record::try_from(v).unwrap())
            .collect()
    }

    fn units(n: i64) -> Amount {
        Amount::from_units(n)
    }

    fn master() -> Dataset {
        dataset(vec![json!({
            "agent_software_id": "a1",
            "simulated_amount..2020-01": 10,
            "simulated_amount..2021-01": 5,
        })])
    }

    fn branch() -> Dataset {
        dataset(vec![
            json!({
                "agent_software_id": "a1",
                "simulated_amount..2020-01": 12,
                "simulated_amount..2021-01": 5,
            }),
            json!({
                "agent_software_id": "a2",
                "simulated_amount..2022-01": 7,
            }),
        ])
    }

    #[test]
    fn empty_dataset_is_empty_view() {
        let view = aggregate(&Dataset::default()).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.total, Amount::ZERO);
        assert!(view.is_consistent());
    }

    #[test]
    fn single_record_views() {
        let view = aggregate(&master()).unwrap();
        assert_eq!(view.total, units(15));
        assert_eq!(view.by_agent.get("a1"), Some(&units(15)));
        assert_eq!(view.by_year.get("2020"), Some(&units(10)));
        assert_eq!(view.by_year.get("2021"), Some(&units(5)));
        assert_eq!(view.agent_year("a1", "2020"), units(10));
        assert_eq!(view.agent_year("a1", "2099"), Amount::ZERO);
        assert!(view.is_consistent());
    }

    #[test]
    fn multi_agent_views() {
        let view = aggregate(&branch()).unwrap();
        assert_eq!(view.total, units(24));
        assert_eq!(view.by_agent.len(), 2);
        assert_eq!(view.by_agent["a1"], units(17));
        assert_eq!(view.by_agent["a2"], units(7));
        assert_eq!(view.by_year["2022"], units(7));
        assert_eq!(view.agent_year("a2", "2022"), units(7));
        assert!(view.is_consistent());
    }

    #[test]
    fn records_without_amounts_add_no_keys() {
        let view = aggregate(&dataset(vec![
            json!({"agent_software_id": "ghost", "comment": "no amounts"}),
            json!({"agent_software_id": "a1", "simulated_amount..2020-01": 1}),
        ]))
        .unwrap();
        assert!(!view.by_agent.contains_key("ghost"));
        assert!(!view.by_agent_year.contains_key("ghost"));
        assert_eq!(view.by_agent.len(), 1);
    }

    #[test]
    fn missing_agent_grouped_as_unknown() {
        let view = aggregate(&dataset(vec![
            json!({"simulated_amount..2020-01": 3}),
            json!({"agent_software_id": "", "simulated_amount..2020-02": 4}),
        ]))
        .unwrap();
        assert_eq!(view.by_agent.get("unknown"), Some(&units(7)));
    }

    #[test]
    fn malformed_year_is_own_bucket() {
        let view = aggregate(&dataset(vec![json!({
            "agent_software_id": "a1",
            "simulated_amount..garbage": 2,
            "simulated_amount..2020": 3,
        })]))
        .unwrap();
        assert_eq!(view.by_year.get("garbage"), Some(&units(2)));
        assert_eq!(view.by_year.get("2020"), Some(&units(3)));
    }

    #[test]
    fn type_mismatch_aborts_with_record_index() {
        let err = aggregate(&dataset(vec![
            json!({"simulated_amount..2020-01": 1}),
            json!({"simulated_amount..2020-01": {"value": 1}}),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            AggregateError::TypeMismatch {
                record: 1,
                field: "simulated_amount..2020-01".into(),
                found: "object",
            }
        );
    }

    #[test]
    fn merge_matches_whole_aggregate() {
        let whole = aggregate(&branch()).unwrap();
        let records = branch();
        let left = aggregate(&records.records()[..1].iter().cloned().collect()).unwrap();
        let right = aggregate(&records.records()[1..].iter().cloned().collect()).unwrap();
        assert_eq!(left.clone().merge(right.clone()), Some(whole.clone()));
        assert_eq!(right.merge(left), Some(whole));
    }

    #[test]
    fn huge_amount_is_out_of_range() {
        let err = aggregate(&dataset(vec![
            json!({"agent_software_id": "a1", "simulated_amount..2020-01": 1}),
            json!({"agent_software_id": "a1", "simulated_amount..2020-01": 1e32}),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            AggregateError::OutOfRange { record: 1, ref field, .. }
                if field == "simulated_amount..2020-01"
        ));
    }

    #[test]
    fn overflowing_sum_is_out_of_range() {
        let err = aggregate(&dataset(vec![
            json!({"agent_software_id": "a1", "simulated_amount..2020-01": 5e31}),
            json!({"agent_software_id": "a2", "simulated_amount..2021-01": 5e31}),
        ]))
        .unwrap_err();
        assert_eq!(err.record(), 1);
        assert!(matches!(err, AggregateError::OutOfRange { .. }));
        assert!(err.to_string().contains("simulated_amount..2021-01"));
    }

    #[test]
    fn overflowing_merge_is_none() {
        let big = aggregate(&dataset(vec![json!({
            "agent_software_id": "a1",
            "simulated_amount..2020-01": 5e31,
        })]))
        .unwrap();
        assert_eq!(big.clone().merge(big), None);
    }

    #[test]
    fn inconsistent_view_detected() {
        let mut view = aggregate(&branch()).unwrap();
        view.total = units(1);
        assert!(!view.is_consistent());
    }

    const AGENTS: &[Option<&str>] = &[Some("a1"), Some("a2"), Some(""), None];
    const YEARS: &[&str] = &["2020", "2021", "2022", "garbage"];

    fn arb_record() -> impl Strategy<Value = Record> {
        (
            prop::sample::select(AGENTS),
            prop::collection::vec(
                (prop::sample::select(YEARS), -1_000_000i64..1_000_000),
                0..5,
            ),
        )
            .prop_map(|(agent, amounts)| {
                let mut record = Record::new();
                if let Some(agent) = agent {
                    record = record.with_field("agent_software_id", json!(agent));
                }
                for (i, (year, cents)) in amounts.into_iter().enumerate() {
                    let value = if i % 2 == 0 {
                        json!(cents as f64 / 100.0)
                    } else {
                        json!(cents)
                    };
                    record = record.with_field(format!("simulated_amount..{year}-{i:02}"), value);
                }
                record.with_field("noise", json!("x"))
            })
    }

    fn arb_records() -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec(arb_record(), 0..20)
    }

    proptest! {
        #[test]
        fn partitions_are_consistent(records in arb_records()) {
            let view = aggregate(&Dataset::new(records)).unwrap();
            prop_assert!(view.is_consistent());
        }

        #[test]
        fn order_does_not_matter(
            (records, shuffled) in arb_records()
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let a = aggregate(&Dataset::new(records)).unwrap();
            let b = aggregate(&Dataset::new(shuffled)).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn every_key_has_a_contribution(records in arb_records()) {
            let dataset = Dataset::new(records);
            let view = aggregate(&dataset).unwrap();
            for agent in view.by_agent.keys() {
                let contributes = dataset.iter().any(|r| {
                    r.agent_id() == agent.as_str() && r.amount_fields().next().is_some()
                });
                prop_assert!(contributes, "agent {} has no contribution", agent);
            }
        }
    }
}
