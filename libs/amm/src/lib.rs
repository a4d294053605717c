//! # Hubswap AMM Library - Hub-Routed Quote Engine
//!
//! ## Purpose
//!
//! Pricing and liquidity accounting for a dual-pool AMM where every asset is
//! paired against a single hub asset (rune). Computes swap outputs, slip and
//! fees for single-hop and hub-routed double-hop swaps, projects pool share
//! and depth for deposits, and splits reserves for withdrawals.
//!
//! ## Integration Points
//!
//! - **Input Sources**: `PoolSnapshots` from the pool-index refresh, hub fiat
//!   price from the price index, amounts and percentages from form state
//! - **Output Destinations**: quote display, and on confirmation a
//!   [`TransactionDraft`] for the memo builder and signer
//! - **Precision**: 8-decimal base units, full `Decimal` precision in between
//! - **Validation**: [`guards`] run before any arithmetic; every failure is a
//!   typed error, never a panic
//!
//! ## Architecture Role
//!
//! Pure, synchronous functions over immutable snapshots. No I/O, no shared
//! mutable state, no hidden configuration: the hub symbol and protection
//! tolerance come in through [`QuoteConfig`], the snapshot and prices through
//! call arguments. Identical inputs always produce identical quotes, so a
//! quote can be recomputed on every keystroke from any thread.
//!
//! ```rust
//! use hubswap_amm::{QuoteConfig, SwapKind, SwapQuoteCalculator};
//! use hubswap_types::{FixedPointAmount, PoolReserveSnapshot, PoolSnapshots, PoolStatus};
//!
//! let pools = PoolSnapshots::new(Some("tbnb1vault".to_string())).with_pool(
//!     PoolReserveSnapshot::new(
//!         "BNB".into(),
//!         FixedPointAmount::from_base_units(376_032_267_901),
//!         FixedPointAmount::from_base_units(2_224_480_142),
//!         FixedPointAmount::from_base_units(188_016_133_950),
//!         PoolStatus::Enabled,
//!     ),
//! );
//!
//! let calculator = SwapQuoteCalculator::new(&QuoteConfig::default()).unwrap();
//! let quote = calculator
//!     .quote(
//!         &"RUNE".into(),
//!         &"BNB".into(),
//!         FixedPointAmount::from_tokens(100),
//!         &pools,
//!         FixedPointAmount::ONE,
//!     )
//!     .unwrap();
//!
//! assert_eq!(quote.swap_kind, SwapKind::Single);
//! assert!(quote.minimum_output <= quote.output_amount);
//! ```

pub mod draft;
pub mod errors;
pub mod guards;
pub mod math;
pub mod stake;
pub mod swap;
pub mod withdraw;

pub use draft::{DraftableQuote, TransactionDraft};
pub use errors::{ErrorKind, GuardError, StakeError, SwapError, WithdrawError};
pub use math::SwapMath;
pub use stake::{LiquidityAddCalculator, LiquidityAddQuote};
pub use swap::{SwapKind, SwapQuote, SwapQuoteCalculator};
pub use withdraw::{LiquidityWithdrawCalculator, LiquidityWithdrawQuote};

pub use hubswap_config::QuoteConfig;
