//! High-level API for simdiff.
//!
//! Ties the store, aggregator and diff engine together: load the master and
//! branch snapshots, aggregate each one, and compare the two views. This is
//! the main entry point for applications embedding simdiff.

pub mod error;
pub mod reconciler;

pub use error::{SdkError, SdkResult, Side};
pub use reconciler::{reconcile_datasets, Reconciler, Reconciliation};

// Re-export key types
pub use simdiff_aggregate::AggregateView;
pub use simdiff_diff::{ComparisonReport, DiffEntry, DiffKey};
pub use simdiff_store::{DatasetStore, FileStore, InMemoryStore};
pub use simdiff_types::{Amount, Dataset, Record};
