//! Garman-Kohlhagen market process.
//!
//! Binds a spot quote to a foreign (dividend) curve, a domestic (risk-free)
//! curve and a Black volatility. Engines read their inputs for a given
//! expiry date through [`GarmanKohlhagenProcess::inputs`].

use pricer_core::market_data::{
    BlackConstantVol, BlackVolTermStructure, FlatForward, MarketDataError, YieldTermStructure,
};
use pricer_core::types::Date;

use crate::analytical::{AnalyticalError, GarmanKohlhagenParams};

/// Spot, two flat curves and a flat vol for an FX pair.
///
/// Spot is quoted in domestic units per foreign unit.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{BlackConstantVol, FlatForward};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::process::GarmanKohlhagenProcess;
///
/// let today = Date::from_ymd(2024, 1, 2).unwrap();
/// let foreign = FlatForward::new(today, 0.01, DayCountConvention::Actual360).unwrap();
/// let domestic = FlatForward::new(today, 0.05, DayCountConvention::Actual360).unwrap();
/// let vol = BlackConstantVol::new(today, 0.2, DayCountConvention::ActualActualIsda).unwrap();
///
/// let process = GarmanKohlhagenProcess::new(1.10, foreign, domestic, vol).unwrap();
/// let inputs = process.inputs(Date::from_ymd(2025, 1, 2).unwrap(), 1.10).unwrap();
/// assert!((inputs.t_rate - 366.0 / 360.0).abs() < 1e-12);
/// assert!((inputs.t_vol - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarmanKohlhagenProcess {
    spot: f64,
    foreign_curve: FlatForward,
    domestic_curve: FlatForward,
    volatility: BlackConstantVol,
}

impl GarmanKohlhagenProcess {
    /// Creates the process.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidSpot` when spot is non-positive or not finite.
    pub fn new(
        spot: f64,
        foreign_curve: FlatForward,
        domestic_curve: FlatForward,
        volatility: BlackConstantVol,
    ) -> Result<Self, MarketDataError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(MarketDataError::InvalidSpot { spot });
        }
        Ok(Self {
            spot,
            foreign_curve,
            domestic_curve,
            volatility,
        })
    }

    /// Spot quote.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Foreign (dividend) curve.
    #[inline]
    pub fn foreign_curve(&self) -> &FlatForward {
        &self.foreign_curve
    }

    /// Domestic (risk-free) curve.
    #[inline]
    pub fn domestic_curve(&self) -> &FlatForward {
        &self.domestic_curve
    }

    /// Black volatility structure.
    #[inline]
    pub fn black_volatility(&self) -> &BlackConstantVol {
        &self.volatility
    }

    /// Reads discount factors, volatility and both time measures for `expiry`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` when `expiry` is not after the
    /// domestic curve's reference date.
    pub fn inputs(&self, expiry: Date, strike: f64) -> Result<BlackInputs, MarketDataError> {
        let t_rate = self.domestic_curve.time_from_reference(expiry);
        if t_rate <= 0.0 {
            return Err(MarketDataError::InvalidMaturity { t: t_rate });
        }
        let t_vol = self.volatility.time_from_reference(expiry);
        if t_vol <= 0.0 {
            return Err(MarketDataError::InvalidMaturity { t: t_vol });
        }

        Ok(BlackInputs {
            spot: self.spot,
            df_domestic: self.domestic_curve.discount_at(expiry)?,
            df_foreign: self.foreign_curve.discount_at(expiry)?,
            volatility: self.volatility.black_vol(t_vol, strike)?,
            strike,
            t_rate,
            t_vol,
        })
    }
}

/// Market inputs for one expiry and strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackInputs {
    /// Spot quote.
    pub spot: f64,
    /// Strike the volatility was read at.
    pub strike: f64,
    /// Domestic discount factor to expiry.
    pub df_domestic: f64,
    /// Foreign discount factor to expiry.
    pub df_foreign: f64,
    /// Black volatility.
    pub volatility: f64,
    /// Expiry measured on the domestic curve's day count.
    pub t_rate: f64,
    /// Expiry measured on the volatility's day count.
    pub t_vol: f64,
}

impl BlackInputs {
    /// Parameters over the volatility time, with rates rescaled so the
    /// discount factors of both curves are reproduced exactly.
    pub fn vol_time_params(&self) -> Result<GarmanKohlhagenParams<f64>, AnalyticalError> {
        self.params_over(self.t_vol)
    }

    /// Parameters over the rate time with the flat volatility.
    pub fn rate_time_params(&self) -> Result<GarmanKohlhagenParams<f64>, AnalyticalError> {
        self.params_over(self.t_rate)
    }

    fn params_over(&self, t: f64) -> Result<GarmanKohlhagenParams<f64>, AnalyticalError> {
        GarmanKohlhagenParams::new(
            self.spot,
            self.strike,
            -self.df_domestic.ln() / t,
            -self.df_foreign.ln() / t,
            self.volatility,
            t,
        )
    }
}
