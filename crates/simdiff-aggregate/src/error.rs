//! Error types for the aggregate crate.

use simdiff_types::TypeError;

/// Errors that can occur while aggregating a dataset.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AggregateError {
    /// An amount field held something other than a number.
    #[error("record {record}: amount field {field:?} is not numeric (found {found})")]
    TypeMismatch {
        record: usize,
        field: String,
        found: &'static str,
    },

    /// An amount field held a number that cannot be represented.
    #[error("record {record}: amount field {field:?} is out of range ({value})")]
    OutOfRange {
        record: usize,
        field: String,
        value: String,
    },
}

impl AggregateError {
    pub(crate) fn from_type_error(record: usize, field: &str, err: TypeError) -> Self {
        let field = field.to_string();
        match err {
            TypeError::NotANumber { found } | TypeError::NotAnObject { found } => {
                AggregateError::TypeMismatch {
                    record,
                    field,
                    found,
                }
            }
            TypeError::OutOfRange(value) => AggregateError::OutOfRange {
                record,
                field,
                value,
            },
        }
    }

    /// Index of the offending record within its dataset.
    pub fn record(&self) -> usize {
        match self {
            AggregateError::TypeMismatch { record, .. }
            | AggregateError::OutOfRange { record, .. } => *record,
        }
    }
}

/// Convenience alias for aggregation results.
pub type AggregateResult<T> = Result<T, AggregateError>;
