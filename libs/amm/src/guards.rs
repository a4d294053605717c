//! Shared precondition checks run before any calculator arithmetic
//!
//! Guards only check structural validity. Whether a large slip should be
//! confirmed by the user is decided by the caller from the returned quote.

use crate::errors::GuardError;
use hubswap_types::{AssetSymbol, Decimal, FixedPointAmount, Percent, PoolReserveSnapshot, PoolSnapshots};

/// Sender address for a transaction; blank counts as missing
pub fn require_sender(sender: Option<&str>) -> Result<&str, GuardError> {
    sender
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(GuardError::MissingWallet)
}

pub fn require_pool<'a>(
    pools: &'a PoolSnapshots,
    asset: &AssetSymbol,
) -> Result<&'a PoolReserveSnapshot, GuardError> {
    pools.get(asset).ok_or_else(|| GuardError::PoolNotFound {
        asset: asset.clone(),
    })
}

pub fn require_pool_address<'a>(
    pools: &'a PoolSnapshots,
    asset: &AssetSymbol,
) -> Result<&'a str, GuardError> {
    pools
        .pool_address(asset)
        .ok_or_else(|| GuardError::MissingPoolAddress {
            asset: asset.clone(),
        })
}

pub fn require_enabled(pool: &PoolReserveSnapshot) -> Result<(), GuardError> {
    if !pool.is_enabled() {
        return Err(GuardError::PoolNotEnabled {
            asset: pool.asset.clone(),
        });
    }
    Ok(())
}

/// Both reserves must be non-zero before they are used as denominators
pub fn require_liquidity(pool: &PoolReserveSnapshot) -> Result<(), GuardError> {
    if !pool.rune_depth.is_positive() {
        return Err(GuardError::InsufficientLiquidity {
            asset: pool.asset.clone(),
            reserve: "rune",
        });
    }
    if !pool.asset_depth.is_positive() {
        return Err(GuardError::InsufficientLiquidity {
            asset: pool.asset.clone(),
            reserve: "asset",
        });
    }
    Ok(())
}

/// Reserves may be zero but never negative
///
/// Snapshots built in code skip raw-record validation, so paths that do not
/// divide by the reserves still check their sign.
pub fn require_non_negative_reserves(pool: &PoolReserveSnapshot) -> Result<(), GuardError> {
    if pool.rune_depth.is_negative() {
        return Err(GuardError::InsufficientLiquidity {
            asset: pool.asset.clone(),
            reserve: "rune",
        });
    }
    if pool.asset_depth.is_negative() {
        return Err(GuardError::InsufficientLiquidity {
            asset: pool.asset.clone(),
            reserve: "asset",
        });
    }
    Ok(())
}

pub fn ensure_positive(
    field: &'static str,
    amount: FixedPointAmount,
) -> Result<FixedPointAmount, GuardError> {
    if !amount.is_positive() {
        return Err(invalid_amount(field, amount));
    }
    Ok(amount)
}

pub fn ensure_non_negative(
    field: &'static str,
    amount: FixedPointAmount,
) -> Result<FixedPointAmount, GuardError> {
    if amount.is_negative() {
        return Err(invalid_amount(field, amount));
    }
    Ok(amount)
}

/// Convert a floating-point form value, rejecting NaN and infinity
pub fn amount_from_f64(field: &'static str, value: f64) -> Result<FixedPointAmount, GuardError> {
    FixedPointAmount::try_from_f64(value).map_err(|_| GuardError::InvalidAmount {
        field,
        value: value.to_string(),
    })
}

/// Parse a typed-in amount string
pub fn amount_from_str(field: &'static str, value: &str) -> Result<FixedPointAmount, GuardError> {
    FixedPointAmount::from_decimal_str(value).map_err(|_| GuardError::InvalidAmount {
        field,
        value: value.to_string(),
    })
}

/// Withdraw percentage must be in (0, 100]
pub fn ensure_withdraw_percent(percent: Percent) -> Result<Percent, GuardError> {
    if percent <= Percent::ZERO || percent > Percent::ONE_HUNDRED {
        return Err(GuardError::InvalidPercent {
            value: percent.as_decimal(),
        });
    }
    Ok(percent)
}

/// Protection tolerance is a fraction in [0, 1)
pub fn ensure_tolerance(tolerance: Decimal) -> Result<Decimal, GuardError> {
    if tolerance < Decimal::ZERO || tolerance >= Decimal::ONE {
        return Err(GuardError::InvalidTolerance { value: tolerance });
    }
    Ok(tolerance)
}

fn invalid_amount(field: &'static str, amount: FixedPointAmount) -> GuardError {
    GuardError::InvalidAmount {
        field,
        value: amount.as_decimal().to_string(),
    }
}
