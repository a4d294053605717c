//! # Hubswap Types Library
//!
//! Value types shared by the swap, liquidity-add and withdraw calculators.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: every amount is a full-precision `Decimal`
//! - **8-Decimal Base Units**: one token is 100,000,000 base units on chain
//! - **Boundary Validation**: raw pool records are checked once, at ingestion
//! - **Immutable Snapshots**: calculators read reserves, they never mutate them
//!
//! ## Quick Start
//!
//! ```rust
//! use hubswap_types::{FixedPointAmount, PoolReserveSnapshot, PoolSnapshots, PoolStatus};
//!
//! let bnb = PoolReserveSnapshot::new(
//!     "BNB".into(),
//!     FixedPointAmount::from_base_units(376_032_267_901),
//!     FixedPointAmount::from_base_units(2_224_480_142),
//!     FixedPointAmount::from_base_units(188_016_133_950),
//!     PoolStatus::Enabled,
//! );
//! let pools = PoolSnapshots::new(Some("tbnb1vault".to_string())).with_pool(bnb);
//!
//! assert!(pools.contains(&"bnb".into()));
//! assert_eq!(pools.pool_address(&"BNB".into()), Some("tbnb1vault"));
//! ```

pub mod common;
pub mod pool;

pub use common::errors::{FixedPointError, SnapshotError};
pub use common::fixed_point::{FixedPointAmount, Percent};
pub use pool::{
    AssetSymbol, PoolReserveSnapshot, PoolSnapshots, PoolStatus, RawPoolRecord, SnapshotLoad,
};

pub use rust_decimal::Decimal;
