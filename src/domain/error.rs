//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors that validate inputs.
//!
//! # Examples
//!
//! ```
//! use edgefinder::domain::error::DomainError;
//! use edgefinder::domain::AmericanOdds;
//!
//! let result = AmericanOdds::try_new(0);
//! assert!(matches!(result, Err(DomainError::ZeroAmericanOdds)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// American odds of exactly zero have no decimal equivalent.
    #[error("american odds cannot be zero")]
    ZeroAmericanOdds,

    /// Decimal odds must be strictly greater than 1.
    #[error("decimal odds must be greater than 1, got {decimal}")]
    DecimalOddsOutOfRange {
        /// The invalid decimal odds that were provided.
        decimal: f64,
    },

    /// A percentage input was negative or not finite.
    #[error("invalid percentage for {field}: {value}")]
    InvalidPercent {
        /// Name of the offending input.
        field: &'static str,
        /// The invalid value.
        value: f64,
    },
}
