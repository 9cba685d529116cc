//! Currency pair types for FX calculations.
//!
//! A pair code such as `EURUSD` names the foreign (base) currency first
//! and the domestic (quote) currency second. Spot is quoted as units of
//! domestic per one unit of foreign.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Currency, CurrencyPair};
//!
//! let pair: CurrencyPair = "usdjpy".parse().unwrap();
//! assert_eq!(pair.foreign(), Currency::USD);
//! assert_eq!(pair.domestic(), Currency::JPY);
//! assert_eq!(pair.to_string(), "USDJPY");
//! ```

use std::fmt;
use std::str::FromStr;

use super::currency::Currency;
use super::error::CurrencyError;

/// A foreign/domestic currency pair.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{Currency, CurrencyPair};
///
/// let eurusd = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
/// assert_eq!(eurusd.code(), "EUR/USD");
///
/// assert!(CurrencyPair::new(Currency::USD, Currency::USD).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyPair {
    /// Foreign (base) currency
    foreign: Currency,
    /// Domestic (quote) currency
    domestic: Currency,
}

impl CurrencyPair {
    /// Creates a new currency pair.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::SameCurrency` if both legs are the same.
    pub fn new(foreign: Currency, domestic: Currency) -> Result<Self, CurrencyError> {
        if foreign == domestic {
            return Err(CurrencyError::SameCurrency(foreign.code().to_string()));
        }
        Ok(Self { foreign, domestic })
    }

    /// Returns the foreign (base) currency.
    #[inline]
    pub fn foreign(&self) -> Currency {
        self.foreign
    }

    /// Returns the domestic (quote) currency.
    #[inline]
    pub fn domestic(&self) -> Currency {
        self.domestic
    }

    /// Returns the pair code in slash notation, e.g. `EUR/USD`.
    pub fn code(&self) -> String {
        format!("{}/{}", self.foreign.code(), self.domestic.code())
    }

    /// Returns the inverted pair (DOMFOR).
    pub fn invert(&self) -> Self {
        Self {
            foreign: self.domestic,
            domestic: self.foreign,
        }
    }
}

impl FromStr for CurrencyPair {
    type Err = CurrencyError;

    /// Parses a six-letter pair code (case-insensitive).
    ///
    /// Fails with `InvalidPairLength` unless the input is exactly six
    /// ASCII characters, `UnknownCurrency` if either leg is unsupported,
    /// and `SameCurrency` if both legs match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 || !s.is_ascii() {
            return Err(CurrencyError::InvalidPairLength(s.to_string()));
        }
        let (foreign, domestic) = s.split_at(3);
        CurrencyPair::new(foreign.parse()?, domestic.parse()?)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.foreign.code(), self.domestic.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ordered_pairs_parse() {
        let mut count = 0;
        for foreign in Currency::ALL {
            for domestic in Currency::ALL {
                if foreign == domestic {
                    continue;
                }
                let code = format!("{}{}", foreign, domestic);
                let pair: CurrencyPair = code.parse().unwrap();
                assert_eq!(pair.foreign(), foreign);
                assert_eq!(pair.domestic(), domestic);
                count += 1;
            }
        }
        assert_eq!(count, 56);
    }

    #[test]
    fn test_length_errors() {
        for bad in ["", "EUR", "EURUSDX", "EUR/USD"] {
            assert!(matches!(
                bad.parse::<CurrencyPair>(),
                Err(CurrencyError::InvalidPairLength(_))
            ));
        }
    }

    #[test]
    fn test_unknown_leg() {
        assert!(matches!(
            "EURXYZ".parse::<CurrencyPair>(),
            Err(CurrencyError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_same_currency() {
        assert!(matches!(
            "usdUSD".parse::<CurrencyPair>(),
            Err(CurrencyError::SameCurrency(_))
        ));
    }

    #[test]
    fn test_invert() {
        let pair: CurrencyPair = "GBPCHF".parse().unwrap();
        let inv = pair.invert();
        assert_eq!(inv.foreign(), Currency::CHF);
        assert_eq!(inv.domestic(), Currency::GBP);
        assert_eq!(inv.invert(), pair);
    }
}
