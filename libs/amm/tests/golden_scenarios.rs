//! Golden-value regression fixtures for the quote engine
//!
//! BNB pool: 3,760.32267901 RUNE / 22.24480142 BNB
//! LOK pool: 2,000 RUNE / 10,000 LOK-3C0

use hubswap_amm::{
    ErrorKind, GuardError, LiquidityAddCalculator, LiquidityWithdrawCalculator, QuoteConfig,
    SwapError, SwapKind, SwapMath, SwapQuoteCalculator, TransactionDraft, WithdrawError,
};
use hubswap_types::{
    AssetSymbol, Decimal, FixedPointAmount, Percent, PoolReserveSnapshot, PoolSnapshots,
    PoolStatus,
};
use rust_decimal_macros::dec;

const VAULT: &str = "tbnb1yxfyeda8pnlxlmx0z3cwx74w9xevspwdpzdxpj";

fn fixture_pools() -> PoolSnapshots {
    PoolSnapshots::new(Some(VAULT.to_string()))
        .with_pool(PoolReserveSnapshot::new(
            "BNB".into(),
            FixedPointAmount::from_base_units(376_032_267_901),
            FixedPointAmount::from_base_units(2_224_480_142),
            FixedPointAmount::from_base_units(188_016_133_950),
            PoolStatus::Enabled,
        ))
        .with_pool(PoolReserveSnapshot::new(
            "LOK-3C0".into(),
            FixedPointAmount::from_base_units(200_000_000_000),
            FixedPointAmount::from_base_units(1_000_000_000_000),
            FixedPointAmount::from_base_units(100_000_000_000),
            PoolStatus::Enabled,
        ))
}

fn swap_calculator() -> SwapQuoteCalculator {
    SwapQuoteCalculator::new(&QuoteConfig::default()).unwrap()
}

fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected} +/- {tolerance}, got {actual}"
    );
}

#[test]
fn single_hop_rune_to_bnb() {
    let quote = swap_calculator()
        .quote(
            &"RUNE".into(),
            &"BNB".into(),
            FixedPointAmount::from_tokens(100),
            &fixture_pools(),
            FixedPointAmount::ONE,
        )
        .unwrap();

    assert_eq!(quote.swap_kind, SwapKind::Single);
    assert_close(quote.output_amount.as_decimal(), dec!(0.56131472), dec!(0.00000001));
    assert_close(quote.liquidity_fee.as_decimal(), dec!(0.0149273), dec!(0.0000001));
    assert_close(quote.output_price.as_decimal(), dec!(178.03053228), dec!(0.00000001));
    assert_eq!(quote.trade_slip_percent, dec!(5));
    assert_close(quote.minimum_output.as_decimal(), dec!(0.54447528), dec!(0.00000001));
    assert_eq!(quote.minimum_output_base_units().unwrap(), 54_447_527);
    assert_eq!(quote.route_pool_addresses, vec![VAULT.to_string()]);
    assert_eq!(quote.output_amount.to_string(), "0.56");
}

// The older LOK -> BNB figure (2.42380508 out, 23.34% slip) is not pinned:
// the LOK depths it was taken against were never recorded, so this uses
// the 10,000 LOK / 2,000 RUNE pool above instead.
#[test]
fn double_hop_lok_to_bnb() {
    let quote = swap_calculator()
        .quote(
            &"LOK-3C0".into(),
            &"BNB".into(),
            FixedPointAmount::from_tokens(1000),
            &fixture_pools(),
            FixedPointAmount::ONE,
        )
        .unwrap();

    assert_eq!(quote.swap_kind, SwapKind::Double);
    assert_close(quote.output_amount.as_decimal(), dec!(0.89718817667), dec!(0.0000000001));
    assert_close(quote.liquidity_fee.as_decimal(), dec!(0.13721647809), dec!(0.0000000001));
    assert_close(quote.output_price.as_decimal(), dec!(183.88996889), dec!(0.00000001));
    assert_eq!(quote.trade_slip_percent, dec!(31.87));
    assert_eq!(
        quote.route_pool_addresses,
        vec![VAULT.to_string(), VAULT.to_string()]
    );
    // 1000 LOK at 0.2 RUNE each, RUNE at 1
    assert_eq!(quote.input_value.as_decimal(), dec!(200));
}

#[test]
fn double_hop_slip_is_not_the_sum_of_hops() {
    let pools = fixture_pools();
    let x = dec!(1000);
    let lok = pools.get(&"LOK-3C0".into()).unwrap();
    let bnb = pools.get(&"BNB".into()).unwrap();

    let hub_amount = SwapMath::swap_output(
        x,
        lok.asset_depth.as_decimal(),
        lok.rune_depth.as_decimal(),
    )
    .unwrap();
    let summed = (SwapMath::swap_slip(x, lok.asset_depth.as_decimal()).unwrap()
        + SwapMath::swap_slip(hub_amount, bnb.rune_depth.as_decimal()).unwrap())
        * dec!(100);

    let quote = swap_calculator()
        .quote(
            &"LOK-3C0".into(),
            &"BNB".into(),
            FixedPointAmount::new(x),
            &pools,
            FixedPointAmount::ONE,
        )
        .unwrap();

    assert_close(summed, dec!(29.98444145), dec!(0.00000001));
    assert!(quote.trade_slip_percent - summed > dec!(1));
}

#[test]
fn hub_price_scales_values_only() {
    let calc = swap_calculator();
    let pools = fixture_pools();
    let at_one = calc
        .quote(&"BNB".into(), &"LOK-3C0".into(), FixedPointAmount::ONE, &pools, FixedPointAmount::ONE)
        .unwrap();
    let at_three = calc
        .quote(
            &"BNB".into(),
            &"LOK-3C0".into(),
            FixedPointAmount::ONE,
            &pools,
            FixedPointAmount::from_tokens(3),
        )
        .unwrap();

    assert_eq!(at_one.output_amount, at_three.output_amount);
    assert_eq!(at_one.trade_slip_percent, at_three.trade_slip_percent);
    assert_eq!(
        at_three.output_price.as_decimal(),
        at_one.output_price.as_decimal() * dec!(3)
    );
}

#[test]
fn swap_edge_cases() {
    let calc = swap_calculator();
    let pools = fixture_pools();

    let missing = calc
        .quote(&"RUNE".into(), &"FTM-585".into(), FixedPointAmount::ONE, &pools, FixedPointAmount::ONE)
        .unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::PoolNotFound);

    for bad in [FixedPointAmount::ZERO, FixedPointAmount::from_tokens(-3)] {
        let err = calc
            .quote(&"RUNE".into(), &"BNB".into(), bad, &pools, FixedPointAmount::ONE)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAmount);
    }

    let drained = PoolSnapshots::new(Some(VAULT.to_string())).with_pool(PoolReserveSnapshot::new(
        "BNB".into(),
        FixedPointAmount::from_tokens(100),
        FixedPointAmount::ZERO,
        FixedPointAmount::from_tokens(100),
        PoolStatus::Enabled,
    ));
    let err = calc
        .quote(&"RUNE".into(), &"BNB".into(), FixedPointAmount::ONE, &drained, FixedPointAmount::ONE)
        .unwrap_err();
    assert!(matches!(
        err,
        SwapError::Guard(GuardError::InsufficientLiquidity { .. })
    ));

    let no_vault = PoolSnapshots::new(None).with_pool(
        fixture_pools().get(&"BNB".into()).unwrap().clone(),
    );
    let err = calc
        .quote(&"RUNE".into(), &"BNB".into(), FixedPointAmount::ONE, &no_vault, FixedPointAmount::ONE)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingPoolAddress);
}

#[test]
fn withdraw_percent_bounds() {
    let calc = LiquidityWithdrawCalculator::new();
    let pools = fixture_pools();
    let bnb = AssetSymbol::from("BNB");

    for percent in [Percent::new(dec!(0)), Percent::new(dec!(101))] {
        let err = calc.quote(&bnb, percent, &pools).unwrap_err();
        assert!(matches!(
            err,
            WithdrawError::Guard(GuardError::InvalidPercent { .. })
        ));
        assert_eq!(err.kind(), ErrorKind::InvalidPercent);
    }

    let quote = calc.quote(&bnb, Percent::new(dec!(33.33)), &pools).unwrap();
    assert_eq!(quote.withdraw_percent.to_basis_points().unwrap(), 3333);
}

#[test]
fn stake_into_existing_pool() {
    let quote = LiquidityAddCalculator::new()
        .quote(
            &"BNB".into(),
            FixedPointAmount::from_tokens(100),
            FixedPointAmount::from_tokens(1),
            &fixture_pools(),
            FixedPointAmount::ONE,
        )
        .unwrap();

    // ((100 / 3860.32267901) + (1 / 23.24480142)) / 2
    assert_eq!(quote.pool_share_percent, dec!(3.45));
    assert_close(quote.current_pool_price.as_decimal(), dec!(169.04276), dec!(0.00001));
    assert!(!quote.is_new_pool);
}

#[test]
fn drafts_carry_sender_and_vault() {
    let pools = fixture_pools();
    let quote = swap_calculator()
        .quote(
            &"BNB".into(),
            &"RUNE".into(),
            FixedPointAmount::ONE,
            &pools,
            FixedPointAmount::ONE,
        )
        .unwrap();

    let draft = TransactionDraft::prepare(Some("tbnb1sender"), quote.clone(), &pools).unwrap();
    assert_eq!(draft.pool_address, VAULT);
    assert_eq!(draft.quote, quote);

    let err = TransactionDraft::prepare(None, quote, &pools).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingWallet);
}

#[test]
fn quotes_are_deterministic_across_threads() {
    let pools = fixture_pools();
    let calc = swap_calculator();
    let expected = calc
        .quote(&"LOK-3C0".into(), &"BNB".into(), FixedPointAmount::from_tokens(250), &pools, FixedPointAmount::ONE)
        .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    calc.quote(
                        &"LOK-3C0".into(),
                        &"BNB".into(),
                        FixedPointAmount::from_tokens(250),
                        &pools,
                        FixedPointAmount::ONE,
                    )
                    .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
