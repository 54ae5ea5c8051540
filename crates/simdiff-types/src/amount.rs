//! Fixed-point monetary amounts.
//!
//! Amounts are stored as a signed count of micro-units (10⁻⁶ of the currency
//! unit). Floating-point input is rounded once, when it enters the system;
//! every sum and comparison after that is exact integer arithmetic, so
//! aggregates do not depend on the order in which values are added.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{json_type_name, TypeError};

/// Number of micro-units in one currency unit.
pub const MICRO_UNITS_PER_UNIT: i128 = 1_000_000;

const MICRO_UNITS_PER_CENT: u128 = (MICRO_UNITS_PER_UNIT / 100) as u128;

/// A signed fixed-point monetary value with micro-unit resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i128);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount. Half of `i128::MAX`, so the difference
    /// of any two in-range amounts is itself representable.
    pub const MAX: Self = Self(i128::MAX / 2);

    /// Smallest representable amount.
    pub const MIN: Self = Self(-(i128::MAX / 2));

    /// Create an amount from a raw micro-unit count.
    pub const fn from_micros(micros: i128) -> Self {
        Self(micros)
    }

    /// Create an amount from a whole number of currency units.
    pub const fn from_units(units: i64) -> Self {
        Self(units as i128 * MICRO_UNITS_PER_UNIT)
    }

    /// Create an amount from a float, rounding half away from zero to the
    /// nearest micro-unit.
    pub fn from_f64(value: f64) -> Result<Self, TypeError> {
        let scaled = (value * MICRO_UNITS_PER_UNIT as f64).round();
        if !scaled.is_finite() || scaled.abs() > Self::MAX.0 as f64 {
            return Err(TypeError::OutOfRange(value.to_string()));
        }
        Ok(Self(scaled as i128))
    }

    /// Convert a JSON value into an amount.
    ///
    /// Integers convert exactly. Floats go through [`Amount::from_f64`].
    /// Any non-numeric value is rejected with [`TypeError::NotANumber`].
    pub fn from_json(value: &Value) -> Result<Self, TypeError> {
        let Value::Number(n) = value else {
            return Err(TypeError::NotANumber {
                found: json_type_name(value),
            });
        };
        if let Some(i) = n.as_i64() {
            Ok(Self(i as i128 * MICRO_UNITS_PER_UNIT))
        } else if let Some(u) = n.as_u64() {
            Ok(Self(u as i128 * MICRO_UNITS_PER_UNIT))
        } else {
            let f = n
                .as_f64()
                .ok_or_else(|| TypeError::OutOfRange(n.to_string()))?;
            Self::from_f64(f)
        }
    }

    /// Raw micro-unit count.
    pub const fn micros(self) -> i128 {
        self.0
    }

    /// Lossy conversion to a float, for serialization.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / MICRO_UNITS_PER_UNIT as f64
    }

    /// Add two amounts, returning `None` if the sum leaves
    /// [`Amount::MIN`]..=[`Amount::MAX`].
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let sum = self.0.checked_add(rhs.0)?;
        (Self::MIN.0..=Self::MAX.0).contains(&sum).then_some(Self(sum))
    }

    /// Sum an iterator of amounts, returning `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Self>>(iter: I) -> Option<Self> {
        iter.into_iter().try_fold(Self::ZERO, Self::checked_add)
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

/// Formats with exactly two decimal places, rounding half away from zero.
///
/// A value that rounds to zero cents prints as `0.00`, never `-0.00`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let mut cents = abs / MICRO_UNITS_PER_CENT;
        if abs % MICRO_UNITS_PER_CENT >= MICRO_UNITS_PER_CENT / 2 {
            cents += 1;
        }
        let sign = if self.0 < 0 && cents != 0 { "-" } else { "" };
        f.pad(&format!("{sign}{}.{:02}", cents / 100, cents % 100))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

/// Unchecked addition. Panics on `i128` overflow in debug builds; use
/// [`Amount::checked_add`] for values that come from input.
impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_convert_exactly() {
        assert_eq!(Amount::from_json(&json!(10)).unwrap(), Amount::from_units(10));
        assert_eq!(Amount::from_json(&json!(-3)).unwrap(), Amount::from_units(-3));
        assert_eq!(
            Amount::from_json(&json!(u64::MAX)).unwrap().micros(),
            u64::MAX as i128 * MICRO_UNITS_PER_UNIT
        );
    }

    #[test]
    fn floats_round_to_micro_units() {
        assert_eq!(Amount::from_json(&json!(0.1)).unwrap().micros(), 100_000);
        assert_eq!(Amount::from_json(&json!(1.0000004)).unwrap().micros(), 1_000_000);
        assert_eq!(Amount::from_json(&json!(-2.5)).unwrap().micros(), -2_500_000);
    }

    #[test]
    fn float_sums_are_exact() {
        let a = Amount::from_f64(0.1).unwrap();
        let b = Amount::from_f64(0.2).unwrap();
        assert_eq!(a + b, Amount::from_f64(0.3).unwrap());
    }

    #[test]
    fn non_numbers_rejected() {
        assert_eq!(
            Amount::from_json(&json!("12")),
            Err(TypeError::NotANumber { found: "string" })
        );
        assert_eq!(
            Amount::from_json(&json!(null)),
            Err(TypeError::NotANumber { found: "null" })
        );
        assert_eq!(
            Amount::from_json(&json!([1])),
            Err(TypeError::NotANumber { found: "array" })
        );
    }

    #[test]
    fn huge_float_out_of_range() {
        assert!(matches!(
            Amount::from_f64(1e300),
            Err(TypeError::OutOfRange(_))
        ));
        assert!(Amount::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn float_beyond_max_out_of_range() {
        assert!(matches!(
            Amount::from_f64(1e32),
            Err(TypeError::OutOfRange(_))
        ));
        assert!(Amount::from_f64(-1e32).is_err());
        assert!(Amount::from_f64(5e31).is_ok());
    }

    #[test]
    fn checked_add_stays_in_range() {
        let big = Amount::from_f64(5e31).unwrap();
        assert_eq!(big.checked_add(big), None);
        assert_eq!((-big).checked_add(-big), None);
        assert_eq!(big.checked_add(-big), Some(Amount::ZERO));
        assert_eq!(Amount::MAX.checked_add(Amount::from_micros(1)), None);
        assert_eq!(
            Amount::from_units(2).checked_add(Amount::from_units(3)),
            Some(Amount::from_units(5))
        );
        // Any two in-range amounts subtract without overflow.
        assert_eq!((Amount::MAX - Amount::MIN).micros(), i128::MAX - 1);
    }

    #[test]
    fn checked_sum_detects_overflow() {
        let big = Amount::from_f64(5e31).unwrap();
        assert_eq!(Amount::checked_sum([big, big]), None);
        assert_eq!(Amount::checked_sum([big, big, -big, -big]), None);
        assert_eq!(
            Amount::checked_sum([Amount::from_units(1), Amount::from_units(2)]),
            Some(Amount::from_units(3))
        );
        assert_eq!(Amount::checked_sum([Amount::ZERO; 0]), Some(Amount::ZERO));
    }

    #[test]
    fn display_two_decimals() {
        assert_eq!(Amount::from_units(15).to_string(), "15.00");
        assert_eq!(Amount::from_micros(1_234_567).to_string(), "1.23");
        assert_eq!(Amount::from_micros(1_235_000).to_string(), "1.24");
        assert_eq!(Amount::from_micros(-1_235_000).to_string(), "-1.24");
        assert_eq!(Amount::from_micros(-4_000).to_string(), "0.00");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn display_honors_width() {
        assert_eq!(format!("{:>8}", Amount::from_units(7)), "    7.00");
    }

    #[test]
    fn arithmetic() {
        let a = Amount::from_units(17);
        let b = Amount::from_units(15);
        assert_eq!(a - b, Amount::from_units(2));
        assert_eq!(b - a, -Amount::from_units(2));
        assert!((b - a).is_negative());
        assert!((a - b).is_positive());
        assert!((a - a).is_zero());

        let total: Amount = [a, b].iter().sum();
        assert_eq!(total, Amount::from_units(32));
    }

    #[test]
    fn serializes_as_number() {
        let v = serde_json::to_value(Amount::from_micros(12_500_000)).unwrap();
        assert_eq!(v, json!(12.5));
    }
}
