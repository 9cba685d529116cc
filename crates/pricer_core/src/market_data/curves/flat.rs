//! Flat forward yield curve implementation.

use super::YieldTermStructure;
use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};

/// Yield curve with a constant continuously compounded rate.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatForward, YieldTermStructure};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2024, 1, 2).unwrap();
/// let curve = FlatForward::new(today, 0.05, DayCountConvention::Actual360).unwrap();
///
/// // Discount factor at t=1: exp(-0.05 * 1)
/// let df = curve.discount(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// // Zero rate is constant
/// assert!((curve.zero_rate(5.0).unwrap() - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatForward {
    reference_date: Date,
    rate: f64,
    day_count: DayCountConvention,
}

impl FlatForward {
    /// Construct a flat curve anchored at `reference_date`.
    ///
    /// Negative rates are accepted; NaN and infinities are not.
    pub fn new(
        reference_date: Date,
        rate: f64,
        day_count: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        if !rate.is_finite() {
            return Err(MarketDataError::InvalidRate { rate });
        }
        Ok(Self {
            reference_date,
            rate,
            day_count,
        })
    }

    /// Return the constant rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl YieldTermStructure for FlatForward {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// ```text
    /// D(t) = exp(-r * t)
    /// ```
    fn discount(&self, t: f64) -> Result<f64, MarketDataError> {
        if t < 0.0 || t.is_nan() {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        if t <= 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok(self.rate)
    }
}
