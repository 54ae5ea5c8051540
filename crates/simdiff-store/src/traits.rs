use simdiff_types::Dataset;

use crate::error::StoreResult;
use crate::parse::parse_dataset;

/// A named source of snapshot datasets.
///
/// Implementations must satisfy these invariants:
/// - A dataset is returned whole or not at all; there is no partial load.
/// - Record order is preserved as stored.
/// - All I/O and format errors are propagated, never silently ignored.
pub trait DatasetStore: Send + Sync {
    /// Read the raw text of a resource.
    fn read_text(&self, name: &str) -> StoreResult<String>;

    /// Read and parse a resource into a dataset.
    ///
    /// Default implementation parses [`read_text`](Self::read_text) with
    /// [`parse_dataset`].
    fn load(&self, name: &str) -> StoreResult<Dataset> {
        let text = self.read_text(name)?;
        parse_dataset(name, &text)
    }
}
