//! Currency pair resolution and reference rates.

use std::collections::BTreeMap;

use pricer_core::types::{Currency, CurrencyError, CurrencyPair};

use crate::error::ContractError;
use crate::request::CURRENCY_PAIR;
use crate::spec::ResolvedPair;

/// Continuously compounded reference rate per currency.
///
/// # Examples
/// ```
/// use adapter_contract::ReferenceRates;
/// use pricer_core::types::Currency;
///
/// let rates = ReferenceRates::default();
/// assert_eq!(rates.rate(Currency::USD).unwrap(), 0.05);
///
/// let partial = ReferenceRates::from_rates([(Currency::USD, 0.04)]);
/// assert_eq!(
///     partial.rate(Currency::JPY).unwrap_err().to_string(),
///     "No reference rate configured for JPY."
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRates {
    rates: BTreeMap<Currency, f64>,
}

impl ReferenceRates {
    /// Builds a table from explicit entries only.
    pub fn from_rates<I>(rates: I) -> Self
    where
        I: IntoIterator<Item = (Currency, f64)>,
    {
        Self {
            rates: rates.into_iter().collect(),
        }
    }

    /// Rate for `currency`.
    ///
    /// # Errors
    ///
    /// `ContractError::Configuration` when the table has no entry.
    pub fn rate(&self, currency: Currency) -> Result<f64, ContractError> {
        self.rates.get(&currency).copied().ok_or_else(|| {
            ContractError::Configuration(format!(
                "No reference rate configured for {}.",
                currency
            ))
        })
    }

    /// Overrides or adds one entry.
    pub fn set(&mut self, currency: Currency, rate: f64) {
        self.rates.insert(currency, rate);
    }

    /// Iterates over configured entries in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }
}

impl Default for ReferenceRates {
    fn default() -> Self {
        Self::from_rates([
            (Currency::USD, 0.05),
            (Currency::EUR, 0.01),
            (Currency::GBP, 0.02),
            (Currency::AUD, 0.04),
            (Currency::NZD, 0.045),
            (Currency::CAD, 0.035),
            (Currency::CHF, 0.005),
            (Currency::JPY, 0.001),
        ])
    }
}

/// Splits six-letter pair codes into legs and attaches their rates.
///
/// The first three letters are the foreign (base) currency and the last
/// three the domestic (quote) currency.
#[derive(Debug, Clone)]
pub struct CurrencyPairResolver<'a> {
    rates: &'a ReferenceRates,
}

impl<'a> CurrencyPairResolver<'a> {
    /// Creates a resolver reading from `rates`.
    pub fn new(rates: &'a ReferenceRates) -> Self {
        Self { rates }
    }

    /// Resolves `raw` into legs and rates.
    ///
    /// Format problems are `Validation` errors; a supported currency with
    /// no configured rate is a `Configuration` error.
    pub fn resolve(&self, raw: &str) -> Result<ResolvedPair, ContractError> {
        let invalid = |message: String| ContractError::Validation(vec![message]);

        let text = raw.trim();
        if text.is_empty() {
            return Err(invalid(format!("{} is empty", CURRENCY_PAIR)));
        }
        if text.chars().count() != 6 {
            return Err(invalid(format!(
                "Invalid {}. Must be 6 characters (e.g. EURUSD).",
                CURRENCY_PAIR
            )));
        }

        let pair: CurrencyPair = text.parse().map_err(|e| match e {
            CurrencyError::SameCurrency(_) => invalid(format!(
                "Invalid {}. Foreign and domestic currencies must differ.",
                CURRENCY_PAIR
            )),
            CurrencyError::UnknownCurrency(_) | CurrencyError::InvalidPairLength(_) => {
                invalid(format!(
                    "Invalid {}. Supported currencies are: {}.",
                    CURRENCY_PAIR,
                    Currency::supported_codes()
                ))
            }
        })?;

        Ok(ResolvedPair {
            foreign: pair.foreign(),
            domestic: pair.domestic(),
            foreign_rate: self.rates.rate(pair.foreign())?,
            domestic_rate: self.rates.rate(pair.domestic())?,
        })
    }
}
