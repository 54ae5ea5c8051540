//! Snapshot storage for simdiff.
//!
//! A [`DatasetStore`] resolves a resource name (usually a file name such as
//! `master_sorted.json`) to a fully materialized [`Dataset`](simdiff_types::Dataset).
//! Reading and parsing failures are fatal and reported as [`StoreError`].
//!
//! # Key Types
//!
//! - [`DatasetStore`] — Trait for named snapshot sources
//! - [`FileStore`] — Reads snapshots from the file system
//! - [`InMemoryStore`] — Holds snapshot text in memory, for tests and embedding

pub mod error;
pub mod file;
pub mod memory;
pub mod parse;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use parse::parse_dataset;
pub use traits::DatasetStore;
