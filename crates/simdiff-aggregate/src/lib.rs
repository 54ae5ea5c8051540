//! Aggregation of simulated amounts.
//!
//! Turns a [`Dataset`](simdiff_types::Dataset) into an [`AggregateView`]:
//! one grand total plus the same contributions partitioned by agent, by
//! year, and by agent and year.
//!
//! # Key Types
//!
//! - [`Contribution`] — One (agent, year, amount) triple extracted from a record
//! - [`AggregateView`] — The four-shaped summary of a dataset
//! - [`aggregate`] — Fold a dataset into its view

pub mod contribution;
pub mod error;
pub mod view;

pub use contribution::{contributions, Contribution};
pub use error::{AggregateError, AggregateResult};
pub use view::{aggregate, AggregateView};
