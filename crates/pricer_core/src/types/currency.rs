//! Currency types for FX option pricing.
//!
//! This module provides the ISO 4217 codes the pricer accepts as legs
//! of a currency pair.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::currency::Currency;
//!
//! let usd = Currency::USD;
//! assert_eq!(usd.code(), "USD");
//! assert_eq!(Currency::ALL.len(), 8);
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// Supported ISO 4217 currency codes.
///
/// # Examples
///
/// ```
/// use pricer_core::types::currency::Currency;
///
/// // Parse from string (case-insensitive)
/// let eur: Currency = "eur".parse().unwrap();
/// assert_eq!(eur, Currency::EUR);
///
/// assert!("XYZ".parse::<Currency>().is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// United States Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Australian Dollar
    AUD,
    /// New Zealand Dollar
    NZD,
    /// Canadian Dollar
    CAD,
    /// Swiss Franc
    CHF,
    /// Japanese Yen
    ///
    /// Standard decimal places: 0 (no minor units)
    JPY,
}

impl Currency {
    /// Every supported currency, in the order used by error messages.
    pub const ALL: [Currency; 8] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::AUD,
        Currency::NZD,
        Currency::CAD,
        Currency::CHF,
        Currency::JPY,
    ];

    /// Returns the ISO 4217 three-letter currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::AUD => "AUD",
            Currency::NZD => "NZD",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
            Currency::JPY => "JPY",
        }
    }

    /// Returns the standard number of decimal places for this currency.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::currency::Currency;
    ///
    /// assert_eq!(Currency::USD.decimal_places(), 2);
    /// assert_eq!(Currency::JPY.decimal_places(), 0);
    /// ```
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Comma-separated list of supported codes, e.g. `USD, EUR, ...`.
    pub fn supported_codes() -> String {
        Currency::ALL
            .iter()
            .map(Currency::code)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses ISO 4217 currency code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == upper)
            .ok_or_else(|| CurrencyError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
