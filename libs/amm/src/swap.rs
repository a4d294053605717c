//! Swap quotes for single-hop (hub <-> asset) and double-hop (asset <-> asset) routes
//!
//! A route touching the hub asset uses one pool. Any other pair is routed
//! source -> hub -> target through the two asset pools, with every
//! intermediate value kept at full precision until the quote is built.

use crate::errors::{GuardError, SwapError};
use crate::guards;
use crate::math::{add, div, mul, sub, SwapMath};
use hubswap_config::QuoteConfig;
use hubswap_types::{
    AssetSymbol, Decimal, FixedPointAmount, FixedPointError, PoolReserveSnapshot, PoolSnapshots,
};
use rust_decimal::RoundingStrategy;
use serde::Serialize;
use tracing::{debug, trace};

/// Number of pools a swap routes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SwapKind {
    Single,
    Double,
}

/// Computed swap, ready for display or a transaction draft
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapQuote {
    pub source_asset: AssetSymbol,
    pub target_asset: AssetSymbol,
    pub swap_kind: SwapKind,
    pub input_amount: FixedPointAmount,
    /// Target-asset amount received, fee already deducted
    pub output_amount: FixedPointAmount,
    /// Fiat price of one target unit at the post-trade pool ratio
    pub output_price: FixedPointAmount,
    /// Integer percent for single-hop, two decimals for double-hop
    pub trade_slip_percent: Decimal,
    /// Liquidity fee in target-asset units
    pub liquidity_fee: FixedPointAmount,
    /// Output below which the swap should be refunded
    pub minimum_output: FixedPointAmount,
    /// Fiat value of the input at the pre-trade pool ratio
    pub input_value: FixedPointAmount,
    pub output_value: FixedPointAmount,
    /// One address per pool on the route, in routing order
    pub route_pool_addresses: Vec<String>,
}

impl SwapQuote {
    /// Minimum output in base units for the swap memo, rounded toward zero
    pub fn minimum_output_base_units(&self) -> Result<i64, FixedPointError> {
        self.minimum_output.to_base_units()
    }
}

/// One pool leg oriented in trade direction
#[derive(Debug, Clone, Copy)]
struct Leg {
    /// Input-side depth
    input_depth: Decimal,
    /// Output-side depth
    output_depth: Decimal,
}

impl Leg {
    fn hub_to_asset(pool: &PoolReserveSnapshot) -> Self {
        Self {
            input_depth: pool.rune_depth.as_decimal(),
            output_depth: pool.asset_depth.as_decimal(),
        }
    }

    fn asset_to_hub(pool: &PoolReserveSnapshot) -> Self {
        Self {
            input_depth: pool.asset_depth.as_decimal(),
            output_depth: pool.rune_depth.as_decimal(),
        }
    }

    fn output(&self, x: Decimal) -> Result<Decimal, FixedPointError> {
        SwapMath::swap_output(x, self.input_depth, self.output_depth)
    }

    fn fee(&self, x: Decimal) -> Result<Decimal, FixedPointError> {
        SwapMath::swap_fee(x, self.input_depth, self.output_depth)
    }

    /// Input-side units per output-side unit after trading `x` for `out`
    fn post_trade_ratio(&self, x: Decimal, out: Decimal) -> Result<Decimal, FixedPointError> {
        div(add(self.input_depth, x)?, sub(self.output_depth, out)?)
    }
}

/// Calculates swap quotes against a pool snapshot
#[derive(Debug, Clone)]
pub struct SwapQuoteCalculator {
    hub: AssetSymbol,
    protection_tolerance: Decimal,
}

impl SwapQuoteCalculator {
    pub fn new(config: &QuoteConfig) -> Result<Self, GuardError> {
        let hub = AssetSymbol::parse(&config.hub_symbol).map_err(|_| GuardError::InvalidHub {
            symbol: config.hub_symbol.clone(),
        })?;
        Ok(Self {
            hub,
            protection_tolerance: guards::ensure_tolerance(config.protection_tolerance)?,
        })
    }

    /// Same calculator with a per-request tolerance, e.g. from a slider
    pub fn with_protection_tolerance(self, tolerance: Decimal) -> Result<Self, GuardError> {
        Ok(Self {
            protection_tolerance: guards::ensure_tolerance(tolerance)?,
            ..self
        })
    }

    pub fn hub(&self) -> &AssetSymbol {
        &self.hub
    }

    pub fn protection_tolerance(&self) -> Decimal {
        self.protection_tolerance
    }

    /// Symbols are upper-cased on construction, so this is case-insensitive
    pub fn is_hub(&self, asset: &AssetSymbol) -> bool {
        *asset == self.hub
    }

    /// Quote swapping `input_amount` of `source` into `target`
    ///
    /// `hub_price` is the fiat price of one hub unit and only affects the
    /// price and value fields.
    pub fn quote(
        &self,
        source: &AssetSymbol,
        target: &AssetSymbol,
        input_amount: FixedPointAmount,
        pools: &PoolSnapshots,
        hub_price: FixedPointAmount,
    ) -> Result<SwapQuote, SwapError> {
        guards::ensure_positive("inputAmount", input_amount)?;
        guards::ensure_non_negative("hubPrice", hub_price)?;
        if source == target {
            return Err(GuardError::SameAsset {
                asset: source.clone(),
            }
            .into());
        }

        let quote = if self.is_hub(source) || self.is_hub(target) {
            self.quote_single(source, target, input_amount, pools, hub_price)?
        } else {
            self.quote_double(source, target, input_amount, pools, hub_price)?
        };

        debug!(
            source = %quote.source_asset,
            target = %quote.target_asset,
            kind = ?quote.swap_kind,
            input = %quote.input_amount.as_decimal(),
            output = %quote.output_amount.as_decimal(),
            slip = %quote.trade_slip_percent,
            minimum = %quote.minimum_output.as_decimal(),
            "Computed swap quote"
        );

        Ok(quote)
    }

    /// Input of `source` needed to receive `desired_output` of `target`
    ///
    /// Single-hop routes only.
    pub fn required_input(
        &self,
        source: &AssetSymbol,
        target: &AssetSymbol,
        desired_output: FixedPointAmount,
        pools: &PoolSnapshots,
    ) -> Result<FixedPointAmount, SwapError> {
        guards::ensure_positive("outputAmount", desired_output)?;
        if source == target {
            return Err(GuardError::SameAsset {
                asset: source.clone(),
            }
            .into());
        }

        let (asset, source_is_hub) = if self.is_hub(source) {
            (target, true)
        } else if self.is_hub(target) {
            (source, false)
        } else {
            return Err(GuardError::UnsupportedRoute {
                from: source.clone(),
                to: target.clone(),
            }
            .into());
        };

        let pool = self.swap_pool(pools, asset)?;
        let leg = if source_is_hub {
            Leg::hub_to_asset(pool)
        } else {
            Leg::asset_to_hub(pool)
        };

        let input = SwapMath::required_input(
            desired_output.as_decimal(),
            leg.input_depth,
            leg.output_depth,
        )?
        .ok_or_else(|| GuardError::InsufficientLiquidity {
            asset: asset.clone(),
            reserve: if source_is_hub { "asset" } else { "rune" },
        })?;

        Ok(FixedPointAmount::new(input))
    }

    fn quote_single(
        &self,
        source: &AssetSymbol,
        target: &AssetSymbol,
        input_amount: FixedPointAmount,
        pools: &PoolSnapshots,
        hub_price: FixedPointAmount,
    ) -> Result<SwapQuote, SwapError> {
        let source_is_hub = self.is_hub(source);
        let asset = if source_is_hub { target } else { source };

        let pool = self.swap_pool(pools, asset)?;
        let address = guards::require_pool_address(pools, asset)?;
        let leg = if source_is_hub {
            Leg::hub_to_asset(pool)
        } else {
            Leg::asset_to_hub(pool)
        };

        let x = input_amount.as_decimal();
        let price = hub_price.as_decimal();
        let output = leg.output(x)?;
        let fee = leg.fee(x)?;
        let slip = mul(SwapMath::swap_slip(x, leg.input_depth)?, Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        let (input_price, output_price) = if source_is_hub {
            (price, mul(price, leg.post_trade_ratio(x, output)?)?)
        } else {
            // asset priced in hub at the pre-trade ratio Y/X
            let asset_price = div(mul(price, leg.output_depth)?, leg.input_depth)?;
            (asset_price, price)
        };

        self.build_quote(
            source,
            target,
            SwapKind::Single,
            input_amount,
            Computed {
                output,
                fee,
                slip,
                input_price,
                output_price,
            },
            vec![address.to_string()],
        )
    }

    fn quote_double(
        &self,
        source: &AssetSymbol,
        target: &AssetSymbol,
        input_amount: FixedPointAmount,
        pools: &PoolSnapshots,
        hub_price: FixedPointAmount,
    ) -> Result<SwapQuote, SwapError> {
        let source_pool = self.swap_pool(pools, source)?;
        let target_pool = self.swap_pool(pools, target)?;
        let source_address = guards::require_pool_address(pools, source)?;
        let target_address = guards::require_pool_address(pools, target)?;

        let first = Leg::asset_to_hub(source_pool);
        let second = Leg::hub_to_asset(target_pool);

        let x = input_amount.as_decimal();
        let price = hub_price.as_decimal();

        let hub_amount = first.output(x)?;
        let output = second.output(hub_amount)?;
        trace!(
            source = %source,
            target = %target,
            hub_amount = %hub_amount,
            output = %output,
            "Routed double swap through hub"
        );

        // First-leg fee is in hub units; value it in target units at the
        // target pool's pre-trade ratio Z/R
        let hub_fee = first.fee(x)?;
        let target_fee = second.fee(hub_amount)?;
        let fee = add(
            target_fee,
            div(mul(hub_fee, second.output_depth)?, second.input_depth)?,
        )?;

        let slip = mul(
            SwapMath::double_swap_slip(x, first.input_depth, hub_amount, second.input_depth)?,
            Decimal::ONE_HUNDRED,
        )?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let input_price = div(mul(price, first.output_depth)?, first.input_depth)?;
        let output_price = mul(price, second.post_trade_ratio(hub_amount, output)?)?;

        self.build_quote(
            source,
            target,
            SwapKind::Double,
            input_amount,
            Computed {
                output,
                fee,
                slip,
                input_price,
                output_price,
            },
            vec![source_address.to_string(), target_address.to_string()],
        )
    }

    /// Pool must exist, be open for swaps, and have both reserves
    fn swap_pool<'a>(
        &self,
        pools: &'a PoolSnapshots,
        asset: &AssetSymbol,
    ) -> Result<&'a PoolReserveSnapshot, GuardError> {
        let pool = guards::require_pool(pools, asset)?;
        guards::require_enabled(pool)?;
        guards::require_liquidity(pool)?;
        Ok(pool)
    }

    fn build_quote(
        &self,
        source: &AssetSymbol,
        target: &AssetSymbol,
        swap_kind: SwapKind,
        input_amount: FixedPointAmount,
        computed: Computed,
        route_pool_addresses: Vec<String>,
    ) -> Result<SwapQuote, SwapError> {
        let minimum_output = mul(
            computed.output,
            sub(Decimal::ONE, self.protection_tolerance)?,
        )?;

        Ok(SwapQuote {
            source_asset: source.clone(),
            target_asset: target.clone(),
            swap_kind,
            input_amount,
            output_amount: FixedPointAmount::new(computed.output),
            output_price: FixedPointAmount::new(computed.output_price),
            trade_slip_percent: computed.slip,
            liquidity_fee: FixedPointAmount::new(computed.fee),
            minimum_output: FixedPointAmount::new(minimum_output),
            input_value: FixedPointAmount::new(mul(
                input_amount.as_decimal(),
                computed.input_price,
            )?),
            output_value: FixedPointAmount::new(mul(computed.output, computed.output_price)?),
            route_pool_addresses,
        })
    }
}

/// Route-specific results before they are packed into a quote
struct Computed {
    output: Decimal,
    fee: Decimal,
    slip: Decimal,
    input_price: Decimal,
    output_price: Decimal,
}
