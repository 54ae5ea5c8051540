use std::fmt;

use thiserror::Error;

/// Which snapshot an operation concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Master,
    Branch,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Master => write!(f, "master"),
            Side::Branch => write!(f, "branch"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("failed to load {side} snapshot: {source}")]
    Load {
        side: Side,
        #[source]
        source: simdiff_store::StoreError,
    },

    #[error("failed to aggregate {side} snapshot {resource}: {source}")]
    Aggregate {
        side: Side,
        resource: String,
        #[source]
        source: simdiff_aggregate::AggregateError,
    },
}

impl SdkError {
    /// The snapshot that caused the failure.
    pub fn side(&self) -> Side {
        match self {
            SdkError::Load { side, .. } | SdkError::Aggregate { side, .. } => *side,
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
