//! Foundation types for simdiff.
//!
//! This crate provides the value and record types shared by every other
//! simdiff crate: the fixed-point [`Amount`], the amount-field name parser,
//! and the dynamically-keyed [`Record`] / [`Dataset`] read from snapshots.
//!
//! # Key Types
//!
//! - [`Amount`] — Signed fixed-point monetary value in micro-units
//! - [`FieldKind`] — Classification of a record field name (amount or ignored)
//! - [`Record`] — One flat JSON object from a snapshot
//! - [`Dataset`] — Ordered, fully materialized sequence of records

pub mod amount;
pub mod error;
pub mod field;
pub mod record;

pub use amount::{Amount, MICRO_UNITS_PER_UNIT};
pub use error::TypeError;
pub use field::{FieldKind, AMOUNT_FIELD_PREFIX};
pub use record::{Dataset, Record, AGENT_ID_FIELD, UNKNOWN_AGENT};
