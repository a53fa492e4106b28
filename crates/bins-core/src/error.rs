//! Error types for bin accumulators
//!
//! Provides a unified error type for all stream-bins crates. Every variant is
//! a precondition violation raised synchronously by the call that caused it;
//! none of them leaves a bin partially mutated.

use thiserror::Error;

/// Core error type for bin operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Slice bounds passed to `add_all_of_from_to` do not describe a valid range
    #[error("Index out of bounds: from={from}, to={to}, size={len}")]
    IndexOutOfBounds { from: usize, to: usize, len: usize },

    /// A measure was queried that the bin was not configured to record
    #[error("Measure not recorded: {measure}")]
    MeasureNotRecorded { measure: &'static str },

    /// Sum of powers requested outside the configured order range
    #[error("Sum of powers of order {order} not recorded (recorded orders: {min}..={max})")]
    PowerOrderOutOfRange { order: i32, min: i32, max: i32 },

    /// An element outside the measure's domain was added
    #[error("{measure} undefined: element {value} is outside its domain")]
    DomainViolation { measure: &'static str, value: f64 },

    /// Paired operation on bins of different sizes
    #[error("Size mismatch in {context}: expected {expected}, got {actual}")]
    SizeMismatch {
        expected: usize,
        actual: usize,
        context: &'static str,
    },

    /// Sampling without replacement asked for more elements than available
    #[error("Cannot sample {requested} elements without replacement from {available}")]
    SampleTooLarge { requested: usize, available: usize },

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} elements, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for an invalid parameter
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Create an error for an empty bin
    pub fn empty_bin() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Check that `from..=to` is a valid inclusive range into a list of `len` elements
    pub fn check_range(from: usize, to: usize, len: usize) -> Result<()> {
        if from > to || to >= len {
            return Err(Self::IndexOutOfBounds { from, to, len });
        }
        Ok(())
    }

    /// Check that a probability lies in [0, 1]
    pub fn check_probability(phi: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&phi) {
            return Err(Self::InvalidParameter(format!(
                "Quantile {phi} must be in [0, 1]"
            )));
        }
        Ok(())
    }

    /// Check that a bin holds at least `expected` elements
    pub fn check_size(actual: usize, expected: usize) -> Result<()> {
        if actual < expected {
            return Err(Self::InsufficientData { expected, actual });
        }
        Ok(())
    }
}
