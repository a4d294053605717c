//! Liquidity-add projections: pool share, price and depth after a deposit

use crate::errors::{GuardError, StakeError};
use crate::guards;
use crate::math::{add, div, mul};
use hubswap_types::{AssetSymbol, Decimal, FixedPointAmount, PoolSnapshots};
use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

/// Projected outcome of depositing into one pool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiquidityAddQuote {
    pub asset: AssetSymbol,
    pub rune_amount: FixedPointAmount,
    pub asset_amount: FixedPointAmount,
    /// Share of the pool after the deposit, 0..=100, two decimals
    pub pool_share_percent: Decimal,
    /// Fiat price of one asset unit before the deposit; zero for a new pool
    pub current_pool_price: FixedPointAmount,
    pub projected_pool_price: FixedPointAmount,
    /// Fiat value of the pool's rune side after the deposit
    pub projected_pool_depth: FixedPointAmount,
    pub is_new_pool: bool,
    pub pool_address: String,
}

/// Calculates liquidity-add quotes against a pool snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidityAddCalculator;

impl LiquidityAddCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Quote depositing `rune_amount` and `asset_amount` into an existing pool
    ///
    /// A listed pool with both depths at zero is treated as new: the
    /// depositor owns all of it afterwards.
    pub fn quote(
        &self,
        asset: &AssetSymbol,
        rune_amount: FixedPointAmount,
        asset_amount: FixedPointAmount,
        pools: &PoolSnapshots,
        rune_price: FixedPointAmount,
    ) -> Result<LiquidityAddQuote, StakeError> {
        Self::validate_amounts(rune_amount, asset_amount)?;
        guards::ensure_non_negative("runePrice", rune_price)?;
        let pool = guards::require_pool(pools, asset)?;
        let pool_address = guards::require_pool_address(pools, asset)?;

        if pool.is_empty() {
            return self.new_pool_quote(asset, rune_amount, asset_amount, rune_price, pool_address);
        }
        guards::require_liquidity(pool)?;

        let big_r = pool.rune_depth.as_decimal();
        let big_t = pool.asset_depth.as_decimal();
        let r = rune_amount.as_decimal();
        let t = asset_amount.as_decimal();
        let pr = rune_price.as_decimal();

        let current_price = mul(div(big_r, big_t)?, pr)?;
        let new_price = div(mul(pr, add(r, big_r)?)?, add(t, big_t)?)?;

        let mean_growth = div(add(div(r, big_r)?, div(t, big_t)?)?, dec!(2))?;
        let new_depth = mul(mul(pr, add(Decimal::ONE, mean_growth)?)?, big_r)?;

        let mean_share = div(
            add(div(r, add(r, big_r)?)?, div(t, add(t, big_t)?)?)?,
            dec!(2),
        )?;
        let share = mul(mean_share, Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let quote = LiquidityAddQuote {
            asset: asset.clone(),
            rune_amount,
            asset_amount,
            pool_share_percent: share,
            current_pool_price: FixedPointAmount::new(current_price),
            projected_pool_price: FixedPointAmount::new(new_price),
            projected_pool_depth: FixedPointAmount::new(new_depth),
            is_new_pool: false,
            pool_address: pool_address.to_string(),
        };
        log_quote(&quote);
        Ok(quote)
    }

    /// Quote creating a pool for an asset the snapshot does not list yet
    ///
    /// Falls through to [`quote`](Self::quote) when the pool already exists,
    /// so the projection always reflects the reserves actually present.
    pub fn quote_new_pool(
        &self,
        asset: &AssetSymbol,
        rune_amount: FixedPointAmount,
        asset_amount: FixedPointAmount,
        pools: &PoolSnapshots,
        rune_price: FixedPointAmount,
    ) -> Result<LiquidityAddQuote, StakeError> {
        if pools.contains(asset) {
            return self.quote(asset, rune_amount, asset_amount, pools, rune_price);
        }

        Self::validate_amounts(rune_amount, asset_amount)?;
        guards::ensure_non_negative("runePrice", rune_price)?;
        let pool_address = guards::require_pool_address(pools, asset)?;
        self.new_pool_quote(asset, rune_amount, asset_amount, rune_price, pool_address)
    }

    fn new_pool_quote(
        &self,
        asset: &AssetSymbol,
        rune_amount: FixedPointAmount,
        asset_amount: FixedPointAmount,
        rune_price: FixedPointAmount,
        pool_address: &str,
    ) -> Result<LiquidityAddQuote, StakeError> {
        let r = rune_amount.as_decimal();
        let t = asset_amount.as_decimal();
        let pr = rune_price.as_decimal();

        let price = if t > Decimal::ZERO {
            mul(div(r, t)?, pr)?
        } else {
            Decimal::ZERO
        };

        let quote = LiquidityAddQuote {
            asset: asset.clone(),
            rune_amount,
            asset_amount,
            pool_share_percent: Decimal::ONE_HUNDRED,
            current_pool_price: FixedPointAmount::ZERO,
            projected_pool_price: FixedPointAmount::new(price),
            projected_pool_depth: FixedPointAmount::new(mul(pr, r)?),
            is_new_pool: true,
            pool_address: pool_address.to_string(),
        };
        log_quote(&quote);
        Ok(quote)
    }

    /// Both amounts non-negative, at least one of them positive
    fn validate_amounts(
        rune_amount: FixedPointAmount,
        asset_amount: FixedPointAmount,
    ) -> Result<(), GuardError> {
        guards::ensure_non_negative("runeAmount", rune_amount)?;
        guards::ensure_non_negative("assetAmount", asset_amount)?;
        if rune_amount.is_zero() && asset_amount.is_zero() {
            return Err(GuardError::InvalidAmount {
                field: "runeAmount",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn log_quote(quote: &LiquidityAddQuote) {
    debug!(
        asset = %quote.asset,
        rune = %quote.rune_amount.as_decimal(),
        amount = %quote.asset_amount.as_decimal(),
        share = %quote.pool_share_percent,
        new_pool = quote.is_new_pool,
        "Computed liquidity add quote"
    );
}
