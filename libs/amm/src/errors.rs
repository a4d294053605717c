//! Error types returned by the quote calculators
//!
//! Every failure is a value, never a panic, so the UI can map it to a
//! field-level message. [`GuardError`] carries the precondition failures
//! shared by all three calculators; each calculator wraps it together with
//! arithmetic failures in its own error type.

use hubswap_types::{AssetSymbol, Decimal, FixedPointError};
use thiserror::Error;

/// Precondition failures detected before any arithmetic runs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GuardError {
    /// Zero, negative, unparsable or non-finite amount
    #[error("Invalid {field}: '{value}'")]
    InvalidAmount { field: &'static str, value: String },

    /// Withdraw percentage outside (0, 100]
    #[error("Withdraw percentage {value} must be greater than 0 and at most 100")]
    InvalidPercent { value: Decimal },

    /// Referenced asset is absent from the snapshot
    #[error("No pool for '{asset}' in the current snapshot")]
    PoolNotFound { asset: AssetSymbol },

    /// A reserve the formula divides by is zero
    #[error("Pool '{asset}' has no {reserve} liquidity")]
    InsufficientLiquidity {
        asset: AssetSymbol,
        reserve: &'static str,
    },

    /// No vault address to send the transaction to
    #[error("No pool address known for '{asset}'")]
    MissingPoolAddress { asset: AssetSymbol },

    /// No sender identity for an operation that builds a transaction
    #[error("No wallet connected")]
    MissingWallet,

    /// Protection tolerance outside [0, 1)
    #[error("Protection tolerance {value} must be at least 0 and below 1")]
    InvalidTolerance { value: Decimal },

    /// Swap routed through a pool that is still bootstrapping
    #[error("Pool '{asset}' is not enabled for swaps")]
    PoolNotEnabled { asset: AssetSymbol },

    /// Configured hub symbol is blank
    #[error("Invalid hub symbol '{symbol}'")]
    InvalidHub { symbol: String },

    #[error("Cannot swap '{asset}' for itself")]
    SameAsset { asset: AssetSymbol },

    /// Operation only defined for routes through a single pool
    #[error("{from} -> {to} routes through two pools, which this operation does not support")]
    UnsupportedRoute { from: AssetSymbol, to: AssetSymbol },
}

/// Flat error classification for mapping to user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidAmount,
    InvalidPercent,
    PoolNotFound,
    InsufficientLiquidity,
    MissingPoolAddress,
    MissingWallet,
    InvalidTolerance,
    PoolNotEnabled,
    InvalidHub,
    SameAsset,
    UnsupportedRoute,
    Arithmetic,
}

impl GuardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            Self::InvalidPercent { .. } => ErrorKind::InvalidPercent,
            Self::PoolNotFound { .. } => ErrorKind::PoolNotFound,
            Self::InsufficientLiquidity { .. } => ErrorKind::InsufficientLiquidity,
            Self::MissingPoolAddress { .. } => ErrorKind::MissingPoolAddress,
            Self::MissingWallet => ErrorKind::MissingWallet,
            Self::InvalidTolerance { .. } => ErrorKind::InvalidTolerance,
            Self::PoolNotEnabled { .. } => ErrorKind::PoolNotEnabled,
            Self::InvalidHub { .. } => ErrorKind::InvalidHub,
            Self::SameAsset { .. } => ErrorKind::SameAsset,
            Self::UnsupportedRoute { .. } => ErrorKind::UnsupportedRoute,
        }
    }
}

/// Failure while computing a swap quote
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SwapError {
    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error("Arithmetic failure while quoting swap: {0}")]
    Arithmetic(#[from] FixedPointError),
}

/// Failure while computing a liquidity-add quote
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StakeError {
    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error("Arithmetic failure while quoting liquidity add: {0}")]
    Arithmetic(#[from] FixedPointError),
}

/// Failure while computing a withdraw quote
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WithdrawError {
    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error("Arithmetic failure while quoting withdraw: {0}")]
    Arithmetic(#[from] FixedPointError),
}

impl SwapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Guard(e) => e.kind(),
            Self::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }
}

impl StakeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Guard(e) => e.kind(),
            Self::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }
}

impl WithdrawError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Guard(e) => e.kind(),
            Self::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }
}
