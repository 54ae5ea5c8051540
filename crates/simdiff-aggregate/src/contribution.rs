//! Extraction of monetary contributions from a single record.

use std::borrow::Cow;

use simdiff_types::{Amount, Record};

use crate::error::{AggregateError, AggregateResult};

/// One amount field of one record, tagged with its agent and year bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contribution<'a> {
    pub agent: Cow<'a, str>,
    /// Name of the amount field this contribution came from.
    pub field: &'a str,
    pub year: &'a str,
    pub amount: Amount,
}

/// Extract every contribution carried by `record`.
///
/// `index` is the record's position in its dataset and only serves to
/// identify the record in errors. A non-numeric amount aborts extraction
/// with [`AggregateError::TypeMismatch`].
pub fn contributions(index: usize, record: &Record) -> AggregateResult<Vec<Contribution<'_>>> {
    let agent = record.agent_id();
    record
        .amount_fields()
        .map(|(field, year, value)| -> AggregateResult<_> {
            let amount = Amount::from_json(value)
                .map_err(|e| AggregateError::from_type_error(index, field, e))?;
            Ok(Contribution {
                agent: agent.clone(),
                field,
                year,
                amount,
            })
        })
        .collect()
}
