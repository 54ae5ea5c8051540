//! Diff engine for simdiff.
//!
//! Compares two [`AggregateView`](simdiff_aggregate::AggregateView)s at four
//! granularities and reports every key whose master and branch amounts
//! differ, together with the delta (`branch - master`).
//!
//! # Key Types
//!
//! - [`DiffKey`] / [`DiffEntry`] -- A disagreeing key and its amounts
//! - [`diff_scalar`] / [`diff_map`] / [`diff_nested_map`] -- The three comparison shapes
//! - [`ComparisonReport`] / [`compare`] -- All four granularities at once

pub mod comparison;
pub mod entry;
pub mod map_diff;

pub use comparison::{compare, ComparisonReport};
pub use entry::{DiffEntry, DiffKey};
pub use map_diff::{diff_map, diff_nested_map, diff_scalar};
