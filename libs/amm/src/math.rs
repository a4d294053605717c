//! Hub-pool AMM math with exact decimal calculations
//!
//! Slip-based fee model: the output of a swap already has the liquidity fee
//! taken out, `y = x·X·Y / (x + X)²`, where `X` is the input-side depth and
//! `Y` the output-side depth of one pool.
//!
//! All functions take full-precision `Decimal`s and never divide by zero;
//! callers run the reserve guards first so a zero depth is reported as
//! missing liquidity rather than an arithmetic error.

use hubswap_types::{Decimal, FixedPointError};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal_macros::dec;

/// Hub-pool swap formulas
pub struct SwapMath;

impl SwapMath {
    /// Swap output for input `x` against depths `(X, Y)`
    ///
    /// `y = x·X·Y / (x + X)²`
    pub fn swap_output(x: Decimal, big_x: Decimal, big_y: Decimal) -> Result<Decimal, FixedPointError> {
        let denom = add(x, big_x)?;
        // ((x·X) / (x+X)) · Y / (x+X) keeps intermediates inside Decimal range
        let partial = div(mul(x, big_x)?, denom)?;
        div(mul(partial, big_y)?, denom)
    }

    /// Liquidity fee paid in output-side units
    ///
    /// `fee = x²·Y / (x + X)²`
    pub fn swap_fee(x: Decimal, big_x: Decimal, big_y: Decimal) -> Result<Decimal, FixedPointError> {
        let denom = add(x, big_x)?;
        let partial = div(mul(x, x)?, denom)?;
        div(mul(partial, big_y)?, denom)
    }

    /// Trade slip of a single swap as a fraction
    ///
    /// `slip = x·(2X + x) / X²`, the ratio of the effective price to the
    /// spot price minus one.
    pub fn swap_slip(x: Decimal, big_x: Decimal) -> Result<Decimal, FixedPointError> {
        let spread = add(mul(dec!(2), big_x)?, x)?;
        div(div(mul(x, spread)?, big_x)?, big_x)
    }

    /// Trade slip of a two-pool swap as a fraction
    ///
    /// `slip = (x + X)²·(y + R)² / (X²·R²) − 1`, with `y` the hub amount
    /// leaving the first pool and `R` the hub depth of the second. This is
    /// `(1 + s1)(1 + s2) − 1`, strictly larger than `s1 + s2`.
    pub fn double_swap_slip(
        x: Decimal,
        big_x: Decimal,
        y: Decimal,
        big_r: Decimal,
    ) -> Result<Decimal, FixedPointError> {
        let first = div(add(x, big_x)?, big_x)?;
        let second = div(add(y, big_r)?, big_r)?;
        let combined = mul(first, second)?;
        sub(mul(combined, combined)?, Decimal::ONE)
    }

    /// Input needed to receive `y` from depths `(X, Y)`
    ///
    /// Inverts `y = x·X·Y / (x + X)²` on its rising branch:
    /// `x = 2yX / ((Y − 2y) + sqrt(Y·(Y − 4y)))`. Returns `None` when
    /// `y >= Y/4`, the largest output the formula can produce.
    pub fn required_input(
        y: Decimal,
        big_x: Decimal,
        big_y: Decimal,
    ) -> Result<Option<Decimal>, FixedPointError> {
        let four_y = mul(dec!(4), y)?;
        if four_y >= big_y {
            return Ok(None);
        }

        let two_y = mul(dec!(2), y)?;
        let root = Self::decimal_sqrt(mul(big_y, sub(big_y, four_y)?)?)?;
        let denom = add(sub(big_y, two_y)?, root)?;
        div(mul(two_y, big_x)?, denom).map(Some)
    }

    /// Square root of a Decimal using Newton's method
    pub fn decimal_sqrt(value: Decimal) -> Result<Decimal, FixedPointError> {
        if value < Decimal::ZERO {
            return Err(FixedPointError::NotFinite {
                value: value.to_f64().unwrap_or(f64::NAN),
            });
        }
        if value.is_zero() {
            return Ok(Decimal::ZERO);
        }

        // Seed from f64 so large values converge in a handful of steps
        let mut x = value
            .to_f64()
            .map(f64::sqrt)
            .and_then(Decimal::from_f64)
            .filter(|guess| *guess > Decimal::ZERO)
            .unwrap_or(value);
        let epsilon = dec!(0.000000000000000001);

        for _ in 0..100 {
            let next_x = div(add(x, div(value, x)?)?, dec!(2))?;
            if (next_x - x).abs() < epsilon {
                return Ok(next_x);
            }
            x = next_x;
        }

        Ok(x)
    }
}

pub(crate) fn add(a: Decimal, b: Decimal) -> Result<Decimal, FixedPointError> {
    a.checked_add(b)
        .ok_or(FixedPointError::Overflow { operation: "addition" })
}

pub(crate) fn sub(a: Decimal, b: Decimal) -> Result<Decimal, FixedPointError> {
    a.checked_sub(b)
        .ok_or(FixedPointError::Overflow { operation: "subtraction" })
}

pub(crate) fn mul(a: Decimal, b: Decimal) -> Result<Decimal, FixedPointError> {
    a.checked_mul(b).ok_or(FixedPointError::Overflow {
        operation: "multiplication",
    })
}

pub(crate) fn div(a: Decimal, b: Decimal) -> Result<Decimal, FixedPointError> {
    if b.is_zero() {
        return Err(FixedPointError::DivisionByZero);
    }
    a.checked_div(b)
        .ok_or(FixedPointError::Overflow { operation: "division" })
}

#[cfg(test)]
mod tests {
    use super::*;

    // BNB pool: 3760.32267901 RUNE / 22.24480142 BNB
    const RUNE_DEPTH: Decimal = dec!(3760.32267901);
    const BNB_DEPTH: Decimal = dec!(22.24480142);

    #[test]
    fn test_swap_output() {
        let out = SwapMath::swap_output(dec!(100), RUNE_DEPTH, BNB_DEPTH).unwrap();
        assert!((out - dec!(0.561314719023064302563386)).abs() < dec!(0.000000000001));
    }

    #[test]
    fn test_swap_fee() {
        let fee = SwapMath::swap_fee(dec!(100), RUNE_DEPTH, BNB_DEPTH).unwrap();
        assert!((fee - dec!(0.014927301908325712926737)).abs() < dec!(0.000000000001));
    }

    #[test]
    fn test_output_plus_fee_is_constant_product_output() {
        // x·Y/(x+X) splits exactly into output and fee
        let x = dec!(250);
        let out = SwapMath::swap_output(x, RUNE_DEPTH, BNB_DEPTH).unwrap();
        let fee = SwapMath::swap_fee(x, RUNE_DEPTH, BNB_DEPTH).unwrap();
        let gross = x * BNB_DEPTH / (x + RUNE_DEPTH);
        assert!((out + fee - gross).abs() < dec!(0.000000000001));
    }

    #[test]
    fn test_swap_slip() {
        let slip = SwapMath::swap_slip(dec!(100), RUNE_DEPTH).unwrap();
        assert!((slip * dec!(100) - dec!(5.389413716466187631)).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_double_slip_exceeds_sum() {
        let x = dec!(1000);
        let lok_depth = dec!(10000);
        let y = dec!(165.289256198347107438016528);
        let double = SwapMath::double_swap_slip(x, lok_depth, y, RUNE_DEPTH).unwrap();
        let sum = SwapMath::swap_slip(x, lok_depth).unwrap() + SwapMath::swap_slip(y, RUNE_DEPTH).unwrap();

        assert!((double * dec!(100) - dec!(31.8711741559098292921)).abs() < dec!(0.0000001));
        assert!(double - sum > dec!(0.01));
    }

    #[test]
    fn test_required_input_inverts_output() {
        let desired = dec!(0.5);
        let x = SwapMath::required_input(desired, RUNE_DEPTH, BNB_DEPTH)
            .unwrap()
            .unwrap();
        let out = SwapMath::swap_output(x, RUNE_DEPTH, BNB_DEPTH).unwrap();
        assert!((out - desired).abs() < dec!(0.0000000001));

        // Y/4 is out of reach
        assert_eq!(
            SwapMath::required_input(BNB_DEPTH / dec!(4), RUNE_DEPTH, BNB_DEPTH).unwrap(),
            None
        );
    }

    #[test]
    fn test_sqrt_accuracy() {
        let result = SwapMath::decimal_sqrt(dec!(100)).unwrap();
        assert!((result - dec!(10)).abs() < dec!(0.0000000001));

        let result = SwapMath::decimal_sqrt(dec!(2)).unwrap();
        assert!((result - dec!(1.41421356237309504880)).abs() < dec!(0.0000000001));

        assert!(SwapMath::decimal_sqrt(dec!(-1)).is_err());
    }

    #[test]
    fn test_division_by_zero_is_error() {
        assert_eq!(div(dec!(1), Decimal::ZERO), Err(FixedPointError::DivisionByZero));
        assert_eq!(
            SwapMath::swap_slip(dec!(1), Decimal::ZERO),
            Err(FixedPointError::DivisionByZero)
        );
    }
}
