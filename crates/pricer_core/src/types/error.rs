//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction, parsing and tenor arithmetic
//! - `CurrencyError`: Errors from currency and currency pair parsing

use thiserror::Error;

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Tenor token does not match `<count><D|W|M|Y>`.
    #[error("Invalid tenor: {0}")]
    InvalidTenor(String),

    /// Date arithmetic left chrono's representable range.
    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// Currency-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::CurrencyError;
///
/// let err = CurrencyError::UnknownCurrency("XYZ".to_string());
/// assert_eq!(format!("{}", err), "Unknown currency: XYZ");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Pair code is not six characters long.
    #[error("Invalid currency pair length: {0}")]
    InvalidPairLength(String),

    /// Foreign and domestic currencies are the same.
    #[error("Foreign and domestic currencies are the same: {0}")]
    SameCurrency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_error_display() {
        let err = DateError::ParseError("bad".to_string());
        assert_eq!(err.to_string(), "Date parse error: bad");

        let err = DateError::InvalidTenor("0Q".to_string());
        assert_eq!(err.to_string(), "Invalid tenor: 0Q");
    }

    #[test]
    fn test_currency_error_display() {
        let err = CurrencyError::SameCurrency("USD".to_string());
        assert!(err.to_string().contains("USD"));

        let err = CurrencyError::InvalidPairLength("USD".to_string());
        assert!(err.to_string().contains("length"));
    }
}
