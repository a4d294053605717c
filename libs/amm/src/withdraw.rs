//! Withdraw projection: proportional share of current reserves
//!
//! Which units a member owns is resolved elsewhere; this only splits the
//! pool's reserves by the requested percentage.

use crate::errors::WithdrawError;
use crate::guards;
use crate::math::mul;
use hubswap_types::{AssetSymbol, FixedPointAmount, Percent, PoolSnapshots};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiquidityWithdrawQuote {
    pub asset: AssetSymbol,
    /// In (0, 100]
    pub withdraw_percent: Percent,
    pub rune_amount_returned: FixedPointAmount,
    pub asset_amount_returned: FixedPointAmount,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidityWithdrawCalculator;

impl LiquidityWithdrawCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn quote(
        &self,
        asset: &AssetSymbol,
        withdraw_percent: Percent,
        pools: &PoolSnapshots,
    ) -> Result<LiquidityWithdrawQuote, WithdrawError> {
        guards::ensure_withdraw_percent(withdraw_percent)?;
        let pool = guards::require_pool(pools, asset)?;
        guards::require_non_negative_reserves(pool)?;

        let fraction = withdraw_percent.to_fraction();
        let rune = mul(pool.rune_depth.as_decimal(), fraction)?;
        let amount = mul(pool.asset_depth.as_decimal(), fraction)?;

        debug!(
            asset = %asset,
            percent = %withdraw_percent,
            rune = %rune,
            amount = %amount,
            "Computed withdraw quote"
        );

        Ok(LiquidityWithdrawQuote {
            asset: asset.clone(),
            withdraw_percent,
            rune_amount_returned: FixedPointAmount::new(rune),
            asset_amount_returned: FixedPointAmount::new(amount),
        })
    }
}
