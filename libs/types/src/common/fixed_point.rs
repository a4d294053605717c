//! Fixed-point amount types for pool and swap calculations
//!
//! Every quantity that flows through a calculator is a [`FixedPointAmount`]:
//! a `Decimal` that keeps full precision across chained computation and is
//! only rounded at two boundaries, conversion to on-chain base units and
//! display.
//!
//! ## Design Principles
//!
//! - **No Floating Point**: `f64` appears only at explicit conversion points
//! - **Base Units**: 1 token = 100,000,000 base units (8 decimals)
//! - **Checked Arithmetic**: overflow and division by zero are errors, never NaN
//! - **Explicit Rounding**: base units round toward zero, display rounds to cents

use crate::common::errors::FixedPointError;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Token amount in whole-token units with 8-decimal base-unit convention
///
/// Examples:
/// - 1 token = `FixedPointAmount::from_base_units(100_000_000)`
/// - 0.00000001 token = `FixedPointAmount::from_base_units(1)` (one base unit)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FixedPointAmount(Decimal);

impl FixedPointAmount {
    /// Decimal places of one base unit
    pub const SCALE: u32 = 8;

    /// Base units per whole token
    pub const BASE_UNITS_PER_TOKEN: i64 = 100_000_000;

    /// Decimal places shown by `Display`
    pub const DISPLAY_DECIMALS: u32 = 2;

    pub const ZERO: Self = Self(Decimal::ZERO);

    pub const ONE: Self = Self(Decimal::ONE);

    /// Wrap a full-precision decimal
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create from an on-chain base-unit integer (exact)
    pub fn from_base_units(units: i64) -> Self {
        Self(Decimal::new(units, Self::SCALE))
    }

    /// Create from whole tokens (exact)
    pub fn from_tokens(tokens: i64) -> Self {
        Self(Decimal::from(tokens))
    }

    /// Parse a decimal token string with exact semantics
    ///
    /// This is the PRIMARY method for amounts entered by a user. More than
    /// 8 decimal places is rejected rather than silently truncated.
    ///
    /// # Examples
    /// ```
    /// use hubswap_types::FixedPointAmount;
    ///
    /// let amount = FixedPointAmount::from_decimal_str("1.5").unwrap();
    /// assert_eq!(amount.to_base_units().unwrap(), 150_000_000);
    /// assert!(FixedPointAmount::from_decimal_str("0.000000001").is_err());
    /// ```
    pub fn from_decimal_str(s: &str) -> Result<Self, FixedPointError> {
        let decimal = Decimal::from_str(s.trim()).map_err(|_| FixedPointError::InvalidDecimal {
            input: s.to_string(),
        })?;

        if decimal.normalize().scale() > Self::SCALE {
            return Err(FixedPointError::PrecisionLoss {
                input: s.to_string(),
            });
        }

        Ok(Self(decimal))
    }

    /// CONVENIENCE method: create from f64 with safety checks
    ///
    /// For UI form state that arrives as floating point. Rejects NaN and
    /// infinity, and rounds to the nearest base unit.
    pub fn try_from_f64(value: f64) -> Result<Self, FixedPointError> {
        if !value.is_finite() {
            return Err(FixedPointError::NotFinite { value });
        }

        let decimal = Decimal::from_f64(value).ok_or(FixedPointError::Overflow {
            operation: "f64 conversion",
        })?;

        Ok(Self(decimal.round_dp_with_strategy(
            Self::SCALE,
            RoundingStrategy::MidpointNearestEven,
        )))
    }

    /// Convert to on-chain base units, rounding toward zero
    ///
    /// Rounding toward zero means a converted amount is never larger than
    /// the computed one, which is what a minimum-output limit needs.
    pub fn to_base_units(self) -> Result<i64, FixedPointError> {
        self.0
            .checked_mul(Decimal::from(Self::BASE_UNITS_PER_TOKEN))
            .and_then(|scaled| scaled.trunc().to_i64())
            .ok_or(FixedPointError::Overflow {
                operation: "base unit conversion",
            })
    }

    /// Full-precision value for chained computation
    pub const fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Value rounded to a number of decimals for display
    pub fn round_for_display(self, decimals: u32) -> Decimal {
        self.0
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Ratio of two amounts; a zero divisor is an error, not infinity
    pub fn checked_ratio(self, rhs: Self) -> Result<Decimal, FixedPointError> {
        if rhs.0.is_zero() {
            return Err(FixedPointError::DivisionByZero);
        }
        self.0.checked_div(rhs.0).ok_or(FixedPointError::Overflow {
            operation: "amount ratio",
        })
    }
}

impl From<Decimal> for FixedPointAmount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for FixedPointAmount {
    type Err = FixedPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

/// Display rounds to cents; the full value stays available via `as_decimal`
impl fmt::Display for FixedPointAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}",
            self.round_for_display(Self::DISPLAY_DECIMALS)
        )
    }
}

/// Panicking arithmetic via traits - use only where overflow is impossible
impl Add for FixedPointAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for FixedPointAmount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Percentage value, e.g. `Percent(50)` is half
///
/// Withdraw memos encode the percentage as an integer of hundredths of a
/// percent, see [`Percent::to_basis_points`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub const ONE_HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create from an integer number of hundredths of a percent
    pub fn from_basis_points(bps: i64) -> Self {
        Self(Decimal::new(bps, 2))
    }

    /// Create from a decimal string with exact parsing
    pub fn from_decimal_str(s: &str) -> Result<Self, FixedPointError> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| FixedPointError::InvalidDecimal {
                input: s.to_string(),
            })
    }

    /// CONVENIENCE method: create from f64 with safety checks
    pub fn try_from_f64(value: f64) -> Result<Self, FixedPointError> {
        if !value.is_finite() {
            return Err(FixedPointError::NotFinite { value });
        }

        Decimal::from_f64(value)
            .map(Self)
            .ok_or(FixedPointError::Overflow {
                operation: "f64 conversion",
            })
    }

    pub const fn as_decimal(self) -> Decimal {
        self.0
    }

    /// The percentage as a fraction, `50%` -> `0.5`
    pub fn to_fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Percent times 100, truncated: `33.335%` -> `3333`
    pub fn to_basis_points(self) -> Result<i64, FixedPointError> {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.trunc().to_i64())
            .ok_or(FixedPointError::Overflow {
                operation: "basis point conversion",
            })
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}%",
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_base_unit_creation() {
        let amount = FixedPointAmount::from_base_units(2_224_480_142);
        assert_eq!(amount.as_decimal(), dec!(22.24480142));
        assert_eq!(amount.to_base_units().unwrap(), 2_224_480_142);
    }

    #[test]
    fn test_decimal_string_parsing() {
        let amount = FixedPointAmount::from_decimal_str("123.45678901").unwrap();
        assert_eq!(amount.to_base_units().unwrap(), 12_345_678_901);

        // Trailing zeros beyond 8 places are not precision loss
        let padded = FixedPointAmount::from_decimal_str("1.5000000000").unwrap();
        assert_eq!(padded.to_base_units().unwrap(), 150_000_000);
    }

    #[test]
    fn test_rejects_sub_base_unit_precision() {
        let err = FixedPointAmount::from_decimal_str("0.123456789").unwrap_err();
        assert!(matches!(err, FixedPointError::PrecisionLoss { .. }));
    }

    #[test]
    fn test_base_units_round_toward_zero() {
        let amount = FixedPointAmount::new(dec!(0.544475277452372373486));
        assert_eq!(amount.to_base_units().unwrap(), 54_447_527);
    }

    #[test]
    fn test_f64_conversion() {
        let amount = FixedPointAmount::try_from_f64(0.1).unwrap();
        assert_eq!(amount.as_decimal(), dec!(0.1));

        assert!(FixedPointAmount::try_from_f64(f64::NAN).is_err());
        assert!(FixedPointAmount::try_from_f64(f64::INFINITY).is_err());
        assert!(FixedPointAmount::try_from_f64(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_checked_ratio_guards_zero() {
        let a = FixedPointAmount::from_tokens(10);
        assert_eq!(
            a.checked_ratio(FixedPointAmount::ZERO),
            Err(FixedPointError::DivisionByZero)
        );
        assert_eq!(a.checked_ratio(FixedPointAmount::from_tokens(4)).unwrap(), dec!(2.5));
    }

    #[test]
    fn test_display_rounds_to_cents() {
        let amount = FixedPointAmount::new(dec!(0.56131471902));
        assert_eq!(amount.to_string(), "0.56");

        let amount = FixedPointAmount::new(dec!(2.005));
        assert_eq!(amount.to_string(), "2.01");

        assert_eq!(FixedPointAmount::from_tokens(3).to_string(), "3.00");
    }

    #[test]
    fn test_percent_conversions() {
        let pct = Percent::from_decimal_str("33.33").unwrap();
        assert_eq!(pct.to_fraction(), dec!(0.3333));
        assert_eq!(pct.to_basis_points().unwrap(), 3333);
        assert_eq!(Percent::ONE_HUNDRED.to_basis_points().unwrap(), 10_000);
        assert_eq!(pct.to_string(), "33.33%");

        assert!(Percent::try_from_f64(f64::NAN).is_err());
        assert!(Percent::from_decimal_str("half").is_err());
    }
}
