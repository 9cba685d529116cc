//! Constant Black volatility implementation.

use super::BlackVolTermStructure;
use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};

/// Volatility term structure with the same σ for every strike and expiry.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{BlackConstantVol, BlackVolTermStructure};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2024, 1, 2).unwrap();
/// let vol = BlackConstantVol::new(today, 0.2, DayCountConvention::ActualActualIsda).unwrap();
///
/// assert_eq!(vol.black_vol(0.5, 1.10).unwrap(), 0.2);
/// assert!((vol.black_variance(2.0, 1.10).unwrap() - 0.08).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackConstantVol {
    reference_date: Date,
    vol: f64,
    day_count: DayCountConvention,
}

impl BlackConstantVol {
    /// Construct a constant volatility anchored at `reference_date`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidVolatility` if `vol` is negative or not finite.
    pub fn new(
        reference_date: Date,
        vol: f64,
        day_count: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        if !vol.is_finite() || vol < 0.0 {
            return Err(MarketDataError::InvalidVolatility { vol });
        }
        Ok(Self {
            reference_date,
            vol,
            day_count,
        })
    }

    /// Return the constant volatility.
    #[inline]
    pub fn vol(&self) -> f64 {
        self.vol
    }
}

impl BlackVolTermStructure for BlackConstantVol {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    fn black_vol(&self, t: f64, strike: f64) -> Result<f64, MarketDataError> {
        if strike <= 0.0 || strike.is_nan() {
            return Err(MarketDataError::InvalidStrike { strike });
        }
        if t < 0.0 || t.is_nan() {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok(self.vol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn today() -> Date {
        Date::from_ymd(2023, 7, 1).unwrap()
    }

    #[test]
    fn test_rejects_negative_vol() {
        assert!(matches!(
            BlackConstantVol::new(today(), -0.1, DayCountConvention::ActualActualIsda),
            Err(MarketDataError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_invalid_strike() {
        let vol = BlackConstantVol::new(today(), 0.1, DayCountConvention::ActualActualIsda).unwrap();
        assert!(vol.black_vol(1.0, 0.0).is_err());
        assert!(vol.black_vol(-1.0, 1.0).is_err());
    }

    #[test]
    fn test_time_uses_own_day_count() {
        let vol = BlackConstantVol::new(today(), 0.1, DayCountConvention::ActualActualIsda).unwrap();
        let expiry = Date::from_ymd(2024, 7, 1).unwrap();
        assert_relative_eq!(
            vol.time_from_reference(expiry),
            184.0 / 365.0 + 182.0 / 366.0,
            epsilon = 1e-14
        );
    }
}
