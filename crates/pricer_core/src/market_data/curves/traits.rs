//! Yield term structure trait definition.

use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};

/// Dated yield curve.
///
/// Times are year fractions measured from [`reference_date`] under the
/// curve's own [`day_count`].
///
/// # Invariants
///
/// - D(0) = 1 (discount factor at time 0 is 1)
/// - D(t) > 0 for all t >= 0 (discount factors are positive)
///
/// [`reference_date`]: YieldTermStructure::reference_date
/// [`day_count`]: YieldTermStructure::day_count
pub trait YieldTermStructure {
    /// Date at which t = 0.
    fn reference_date(&self) -> Date;

    /// Convention converting dates to times.
    fn day_count(&self) -> DayCountConvention;

    /// Return the discount factor for time `t` (years, must be >= 0).
    fn discount(&self, t: f64) -> Result<f64, MarketDataError>;

    /// Year fraction from the reference date to `date`.
    fn time_from_reference(&self, date: Date) -> f64 {
        self.day_count().year_fraction(self.reference_date(), date)
    }

    /// Return the discount factor for a calendar date.
    fn discount_at(&self, date: Date) -> Result<f64, MarketDataError> {
        self.discount(self.time_from_reference(date))
    }

    /// Return the continuously compounded zero rate for time `t` (must be > 0).
    ///
    /// ```text
    /// r(t) = -ln(D(t)) / t
    /// ```
    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        if t <= 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok(-self.discount(t)?.ln() / t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock implementation for testing default methods
    struct MockCurve {
        reference: Date,
        rate: f64,
    }

    impl YieldTermStructure for MockCurve {
        fn reference_date(&self) -> Date {
            self.reference
        }

        fn day_count(&self) -> DayCountConvention {
            DayCountConvention::Actual365Fixed
        }

        fn discount(&self, t: f64) -> Result<f64, MarketDataError> {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            Ok((-self.rate * t).exp())
        }
    }

    #[test]
    fn test_default_zero_rate() {
        let curve = MockCurve {
            reference: Date::from_ymd(2024, 1, 1).unwrap(),
            rate: 0.03,
        };
        assert!((curve.zero_rate(2.0).unwrap() - 0.03).abs() < 1e-12);
        assert!(curve.zero_rate(0.0).is_err());
    }

    #[test]
    fn test_default_discount_at() {
        let reference = Date::from_ymd(2024, 1, 1).unwrap();
        let curve = MockCurve {
            reference,
            rate: 0.03,
        };
        let date = reference.add_days(365).unwrap();
        let df = curve.discount_at(date).unwrap();
        assert!((df - (-0.03_f64).exp()).abs() < 1e-12);

        let before = reference.add_days(-1).unwrap();
        assert!(curve.discount_at(before).is_err());
    }
}
