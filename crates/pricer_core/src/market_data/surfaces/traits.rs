//! Black volatility term structure trait definition.

use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};

/// Dated Black volatility lookup.
///
/// Like [`YieldTermStructure`](crate::market_data::YieldTermStructure), the
/// time argument is a year fraction from the reference date under the
/// structure's own day count, which need not match the rate curves'.
pub trait BlackVolTermStructure {
    /// Date at which t = 0.
    fn reference_date(&self) -> Date;

    /// Convention converting dates to times.
    fn day_count(&self) -> DayCountConvention;

    /// Return the Black volatility for expiry time `t` and `strike`.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidStrike` - If strike <= 0
    /// * `MarketDataError::InvalidMaturity` - If t < 0
    fn black_vol(&self, t: f64, strike: f64) -> Result<f64, MarketDataError>;

    /// Year fraction from the reference date to `date`.
    fn time_from_reference(&self, date: Date) -> f64 {
        self.day_count().year_fraction(self.reference_date(), date)
    }

    /// Total Black variance σ²·t.
    fn black_variance(&self, t: f64, strike: f64) -> Result<f64, MarketDataError> {
        let vol = self.black_vol(t, strike)?;
        Ok(vol * vol * t)
    }
}
