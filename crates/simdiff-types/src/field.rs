//! Amount-field name parsing.
//!
//! Snapshot records carry one field per simulated amount, named
//! `simulated_amount..<year>-<rest>`. The year is whatever sits between the
//! prefix and the first `-`; it is not validated, so `simulated_amount..garbage`
//! lands in the `"garbage"` bucket.

/// Literal prefix shared by every amount field.
pub const AMOUNT_FIELD_PREFIX: &str = "simulated_amount..";

/// Classification of a record field name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind<'a> {
    /// A monetary contribution tagged with a year bucket.
    Amount { year: &'a str },
    /// Any other field; contributes to no aggregate.
    Ignored,
}

impl<'a> FieldKind<'a> {
    /// Classify a field name.
    pub fn parse(name: &'a str) -> Self {
        let Some(rest) = name.strip_prefix(AMOUNT_FIELD_PREFIX) else {
            return FieldKind::Ignored;
        };
        match rest.split_once('-') {
            Some((year, _suffix)) => FieldKind::Amount { year },
            // No suffix: the whole remainder is the year.
            None => FieldKind::Amount { year: rest },
        }
    }

    /// The year bucket, if this is an amount field.
    pub fn year(&self) -> Option<&'a str> {
        match self {
            FieldKind::Amount { year } => Some(year),
            FieldKind::Ignored => None,
        }
    }

    pub fn is_amount(&self) -> bool {
        matches!(self, FieldKind::Amount { .. })
    }
}
