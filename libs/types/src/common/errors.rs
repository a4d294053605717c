//! Error types for fixed-point arithmetic and pool snapshot validation
//!
//! Covers overflow, division-by-zero, and conversion failures in amount
//! arithmetic, as well as the boundary checks that turn loosely-typed pool
//! records into immutable reserve snapshots.

use thiserror::Error;

/// Errors that can occur while turning a raw pool record into a snapshot
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// A required field was absent from the record
    #[error("Pool record for '{asset}' is missing field '{field}'")]
    MissingField { asset: String, field: &'static str },

    /// A depth or unit field was not a non-negative base-unit integer
    #[error("Pool record for '{asset}' has invalid {field}: '{value}'")]
    InvalidDepth {
        asset: String,
        field: &'static str,
        value: String,
    },

    /// Status string is not one the engine understands
    #[error("Pool record for '{asset}' has unknown status '{status}'")]
    UnknownStatus { asset: String, status: String },

    /// Asset symbol is empty or whitespace
    #[error("Pool record has an empty asset symbol")]
    EmptySymbol,
}

/// Errors that can occur during fixed-point arithmetic operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FixedPointError {
    /// Intermediate result exceeds the representable range
    #[error("Overflow in {operation}")]
    Overflow { operation: &'static str },

    /// Invalid decimal string format
    #[error("Invalid decimal string: '{input}' - expected numeric format")]
    InvalidDecimal { input: String },

    /// Division by zero in fixed-point arithmetic
    #[error("Division by zero in fixed-point arithmetic")]
    DivisionByZero,

    /// Value carries more decimals than the 8-decimal base unit allows
    #[error("Precision loss: '{input}' has more than 8 decimal places")]
    PrecisionLoss { input: String },

    /// Value is not finite (NaN or infinity)
    #[error("Value is not finite: {value}")]
    NotFinite { value: f64 },
}
