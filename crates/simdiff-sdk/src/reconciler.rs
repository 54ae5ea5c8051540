use simdiff_aggregate::{aggregate, AggregateView};
use simdiff_diff::{compare, ComparisonReport};
use simdiff_store::DatasetStore;
use simdiff_types::Dataset;
use tracing::{debug, info};

use crate::error::{SdkError, SdkResult, Side};

/// Result of one master/branch reconciliation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconciliation {
    pub master: AggregateView,
    pub branch: AggregateView,
    pub report: ComparisonReport,
}

/// Loads, aggregates and compares master and branch snapshots.
pub struct Reconciler<S: DatasetStore> {
    store: S,
}

impl<S: DatasetStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run a full reconciliation of the named snapshots.
    ///
    /// Both snapshots are loaded before either is aggregated, so a read or
    /// parse failure on either side aborts the run before any aggregation.
    pub fn run(&self, master: &str, branch: &str) -> SdkResult<Reconciliation> {
        let master_data = self.load(Side::Master, master)?;
        let branch_data = self.load(Side::Branch, branch)?;

        let master_view = aggregate_side(Side::Master, master, &master_data)?;
        let branch_view = aggregate_side(Side::Branch, branch, &branch_data)?;
        let report = compare(&master_view, &branch_view);

        info!(
            master = master,
            branch = branch,
            differences = report.len(),
            total_delta = %report.total_delta(),
            "reconciliation complete"
        );

        Ok(Reconciliation {
            master: master_view,
            branch: branch_view,
            report,
        })
    }

    fn load(&self, side: Side, name: &str) -> SdkResult<Dataset> {
        let dataset = self
            .store
            .load(name)
            .map_err(|source| SdkError::Load { side, source })?;
        debug!(%side, resource = name, records = dataset.len(), "loaded snapshot");
        Ok(dataset)
    }
}

/// Reconcile two already materialized datasets.
pub fn reconcile_datasets(master: &Dataset, branch: &Dataset) -> SdkResult<Reconciliation> {
    let master_view = aggregate_side(Side::Master, "<memory>", master)?;
    let branch_view = aggregate_side(Side::Branch, "<memory>", branch)?;
    let report = compare(&master_view, &branch_view);
    Ok(Reconciliation {
        master: master_view,
        branch: branch_view,
        report,
    })
}

fn aggregate_side(side: Side, resource: &str, dataset: &Dataset) -> SdkResult<AggregateView> {
    let view = aggregate(dataset).map_err(|source| SdkError::Aggregate {
        side,
        resource: resource.to_string(),
        source,
    })?;
    debug!(%side, consistent = view.is_consistent(), "aggregated snapshot");
    Ok(view)
}
