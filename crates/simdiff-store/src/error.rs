/// Errors from loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The resource could not be read.
    #[error("cannot read {name}: {source}")]
    Resource {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The resource was read but is not a JSON array of objects.
    #[error("malformed dataset {name}: {source}")]
    Format {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// No resource is registered under the name.
    #[error("dataset not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// Name of the resource that failed.
    pub fn resource(&self) -> &str {
        match self {
            StoreError::Resource { name, .. } | StoreError::Format { name, .. } => name,
            StoreError::NotFound(name) => name,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
