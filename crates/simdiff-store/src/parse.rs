use simdiff_types::Dataset;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Parse snapshot text into a dataset.
///
/// The text must be a JSON array whose elements are all objects. `name` only
/// labels errors and log lines.
pub fn parse_dataset(name: &str, text: &str) -> StoreResult<Dataset> {
    let dataset: Dataset = serde_json::from_str(text).map_err(|source| StoreError::Format {
        name: name.to_string(),
        source,
    })?;
    debug!(resource = name, records = dataset.len(), "parsed dataset");
    Ok(dataset)
}
