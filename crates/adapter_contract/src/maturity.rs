//! Maturity resolution.
//!
//! Accepts either an absolute `DDMonYYYY` date or a tenor code
//! (`1D`, `2W`, `3M`, `10Y`) relative to an injected evaluation date.

use pricer_core::types::{Date, Tenor};

use crate::request::MATURITY;
use crate::spec::ResolvedDates;

const FORMAT_ERROR: &str =
    "Invalid MATURITY format. Use DDMonYYYY (e.g. 10Sep2023) or a tenor such as 1D, 2W, 3M, 1Y.";
const PAST_ERROR: &str = "MATURITY is before today's date.";

/// Calendar days between expiry and delivery, and between evaluation and settlement.
const SETTLEMENT_LAG_DAYS: i64 = 2;

/// Resolves the maturity field against a fixed evaluation date.
///
/// # Examples
/// ```
/// use adapter_contract::MaturityResolver;
/// use pricer_core::types::Date;
///
/// let today = Date::from_ymd(2024, 1, 31).unwrap();
/// let resolver = MaturityResolver::new(today);
///
/// let dates = resolver.resolve("1M").unwrap();
/// assert_eq!(dates.expiry, Date::from_ymd(2024, 2, 29).unwrap());
/// assert_eq!(dates.delivery, Date::from_ymd(2024, 3, 2).unwrap());
/// assert_eq!(dates.settlement, Date::from_ymd(2024, 2, 2).unwrap());
///
/// assert!(resolver.resolve("10Sep2023").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaturityResolver {
    today: Date,
}

impl MaturityResolver {
    /// Creates a resolver anchored at `today`.
    pub fn new(today: Date) -> Self {
        Self { today }
    }

    /// Evaluation date used for every resolution.
    pub fn today(&self) -> Date {
        self.today
    }

    /// Resolves `raw` into evaluation, expiry, delivery and settlement dates.
    pub fn resolve(&self, raw: &str) -> Result<ResolvedDates, String> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(format!("{} is empty", MATURITY));
        }

        let expiry = match text.chars().count() {
            9 => {
                let date = Date::parse_ddmonyyyy(text).map_err(|_| FORMAT_ERROR.to_string())?;
                if date <= self.today {
                    return Err(PAST_ERROR.to_string());
                }
                date
            }
            2 | 3 => {
                let tenor: Tenor = text.parse().map_err(|_| FORMAT_ERROR.to_string())?;
                self.today
                    .advance(tenor)
                    .map_err(|_| FORMAT_ERROR.to_string())?
            }
            _ => return Err(FORMAT_ERROR.to_string()),
        };

        let lag = |date: Date| {
            date.add_days(SETTLEMENT_LAG_DAYS)
                .map_err(|_| FORMAT_ERROR.to_string())
        };

        let dates = ResolvedDates {
            evaluation: self.today,
            expiry,
            delivery: lag(expiry)?,
            settlement: lag(self.today)?,
        };
        tracing::debug!(
            maturity = text,
            evaluation = %dates.evaluation,
            expiry = %dates.expiry,
            delivery = %dates.delivery,
            "Resolved maturity"
        );
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::TimeUnit;
    use proptest::prelude::*;

    fn today() -> Date {
        Date::from_ymd(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_tenor_grid() {
        let resolver = MaturityResolver::new(today());
        let expected = [
            ("1D", (2024, 3, 16)),
            ("2D", (2024, 3, 17)),
            ("3D", (2024, 3, 18)),
            ("1W", (2024, 3, 22)),
            ("2W", (2024, 3, 29)),
            ("3W", (2024, 4, 5)),
            ("1M", (2024, 4, 15)),
            ("2M", (2024, 5, 15)),
            ("3M", (2024, 6, 15)),
            ("1Y", (2025, 3, 15)),
            ("2Y", (2026, 3, 15)),
            ("3Y", (2027, 3, 15)),
        ];
        for (tenor, (y, m, d)) in expected {
            let dates = resolver.resolve(tenor).unwrap();
            assert_eq!(dates.expiry, Date::from_ymd(y, m, d).unwrap(), "{}", tenor);
            assert_eq!(dates.evaluation, today());
        }
    }

    #[test]
    fn test_lowercase_units_and_dates() {
        let resolver = MaturityResolver::new(today());
        assert_eq!(
            resolver.resolve("3m").unwrap().expiry,
            Date::from_ymd(2024, 6, 15).unwrap()
        );
        assert_eq!(
            resolver.resolve("10sep2025").unwrap().expiry,
            Date::from_ymd(2025, 9, 10).unwrap()
        );
    }

    #[test]
    fn test_absolute_date_must_be_after_today() {
        let resolver = MaturityResolver::new(today());
        assert_eq!(resolver.resolve("15Mar2024").unwrap_err(), PAST_ERROR);
        assert_eq!(resolver.resolve("10Sep2023").unwrap_err(), PAST_ERROR);
        assert!(resolver.resolve("16Mar2024").is_ok());
    }

    #[test]
    fn test_format_errors() {
        let resolver = MaturityResolver::new(today());
        for raw in ["0M", "1Q", "M1", "1000D", "2024-09-10", "31Feb2025", "X", "1.5Y"] {
            assert_eq!(resolver.resolve(raw).unwrap_err(), FORMAT_ERROR, "{}", raw);
        }
        assert_eq!(resolver.resolve("  ").unwrap_err(), "MATURITY is empty");
    }

    #[test]
    fn test_derived_dates() {
        let dates = MaturityResolver::new(today()).resolve("1W").unwrap();
        assert_eq!(dates.delivery, Date::from_ymd(2024, 3, 24).unwrap());
        assert_eq!(dates.settlement, Date::from_ymd(2024, 3, 17).unwrap());
    }

    proptest! {
        #[test]
        fn prop_tenor_matches_date_arithmetic(count in 1u32..=99, unit in 0usize..4) {
            let unit = [TimeUnit::Days, TimeUnit::Weeks, TimeUnit::Months, TimeUnit::Years][unit];
            let tenor = Tenor::new(count, unit).unwrap();
            let dates = MaturityResolver::new(today()).resolve(&tenor.to_string()).unwrap();
            prop_assert_eq!(dates.expiry, today().advance(tenor).unwrap());
            prop_assert!(dates.expiry > dates.evaluation);
        }
    }
}
