//! Garman-Kohlhagen model for FX option pricing.
//!
//! This module provides the Garman-Kohlhagen closed-form solution for pricing
//! European FX options. It extends Black-Scholes to two interest rates: the
//! domestic rate discounts the payoff and the foreign rate plays the role of
//! a continuous dividend yield.
//!
//! # Mathematical Background
//!
//! - S: spot exchange rate (domestic per foreign)
//! - K: strike
//! - rd: domestic risk-free rate (continuous compounding)
//! - rf: foreign risk-free rate (continuous compounding)
//! - σ: volatility of the exchange rate
//! - T: time to maturity in years
//!
//! ## Call Option Price
//! C = S * e^(-rf*T) * N(d1) - K * e^(-rd*T) * N(d2)
//!
//! ## Put Option Price
//! P = K * e^(-rd*T) * N(-d2) - S * e^(-rf*T) * N(-d1)
//!
//! where:
//! d1 = [ln(S/K) + (rd - rf + σ²/2) * T] / (σ * √T)
//! d2 = d1 - σ * √T
//!
//! # Examples
//!
//! ```
//! use pricer_models::analytical::garman_kohlhagen::{
//!     GarmanKohlhagen, GarmanKohlhagenParams,
//! };
//! use pricer_models::instruments::OptionType;
//!
//! let params = GarmanKohlhagenParams::new(
//!     1.10,   // spot
//!     1.12,   // strike
//!     0.03,   // domestic rate (3%)
//!     0.01,   // foreign rate (1%)
//!     0.15,   // volatility (15%)
//!     1.0,    // expiry (1 year)
//! ).unwrap();
//!
//! let model = GarmanKohlhagen::new(params);
//! let call_price = model.price(OptionType::Call);
//! let put_price = model.price(OptionType::Put);
//!
//! // Put-call parity check
//! let parity_diff = call_price - put_price
//!     - (1.10 * (-0.01_f64).exp() - 1.12 * (-0.03_f64).exp());
//! assert!(parity_diff.abs() < 1e-12);
//! ```

use num_traits::Float;

use super::distributions::{lit, norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionType;

/// Parameters for the Garman-Kohlhagen model.
///
/// # Type Parameters
///
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
#[derive(Debug, Clone, Copy)]
pub struct GarmanKohlhagenParams<T: Float> {
    /// Spot exchange rate (domestic per foreign).
    pub spot: T,
    /// Strike price.
    pub strike: T,
    /// Domestic risk-free rate (continuous compounding).
    pub rate_domestic: T,
    /// Foreign risk-free rate (continuous compounding).
    pub rate_foreign: T,
    /// Volatility of the exchange rate.
    pub volatility: T,
    /// Time to expiry in years.
    pub expiry: T,
}

impl<T: Float> GarmanKohlhagenParams<T> {
    /// Creates new Garman-Kohlhagen parameters.
    ///
    /// # Arguments
    ///
    /// * `spot` - Spot exchange rate (must be positive)
    /// * `strike` - Strike price (must be positive)
    /// * `rate_domestic` - Domestic risk-free rate (can be negative)
    /// * `rate_foreign` - Foreign risk-free rate (can be negative)
    /// * `volatility` - Volatility (must be positive)
    /// * `expiry` - Time to expiry in years (must be positive)
    ///
    /// # Errors
    ///
    /// Returns `AnalyticalError` if any parameter is invalid.
    pub fn new(
        spot: T,
        strike: T,
        rate_domestic: T,
        rate_foreign: T,
        volatility: T,
        expiry: T,
    ) -> Result<Self, AnalyticalError> {
        if spot <= T::zero() || spot.is_nan() {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if strike <= T::zero() || strike.is_nan() {
            return Err(AnalyticalError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }
        if volatility <= T::zero() || volatility.is_nan() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        if expiry <= T::zero() || expiry.is_nan() {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            strike,
            rate_domestic,
            rate_foreign,
            volatility,
            expiry,
        })
    }

    /// Returns the forward exchange rate.
    ///
    /// F = S * exp((rd - rf) * T)
    #[inline]
    pub fn forward(&self) -> T {
        let drift = (self.rate_domestic - self.rate_foreign) * self.expiry;
        self.spot * drift.exp()
    }
}

/// Garman-Kohlhagen model for FX option pricing.
///
/// Provides closed-form price and Greeks for European FX options.
#[derive(Debug, Clone)]
pub struct GarmanKohlhagen<T: Float> {
    params: GarmanKohlhagenParams<T>,
    /// d1 term from the formula.
    d1: T,
    /// d2 term from the formula.
    d2: T,
    /// √T
    sqrt_t: T,
    /// e^(-rd * T)
    df_domestic: T,
    /// e^(-rf * T)
    df_foreign: T,
}

impl<T: Float> GarmanKohlhagen<T> {
    /// Creates a new Garman-Kohlhagen model instance.
    ///
    /// Pre-computes d1, d2, and discount factors.
    pub fn new(params: GarmanKohlhagenParams<T>) -> Self {
        let sqrt_t = params.expiry.sqrt();
        let vol_sqrt_t = params.volatility * sqrt_t;

        // d1 = [ln(S/K) + (rd - rf + σ²/2) * T] / (σ * √T)
        let log_sk = (params.spot / params.strike).ln();
        let drift = params.rate_domestic - params.rate_foreign
            + params.volatility * params.volatility / lit(2.0);
        let d1 = (log_sk + drift * params.expiry) / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;

        let df_domestic = (-params.rate_domestic * params.expiry).exp();
        let df_foreign = (-params.rate_foreign * params.expiry).exp();

        Self {
            params,
            d1,
            d2,
            sqrt_t,
            df_domestic,
            df_foreign,
        }
    }

    /// Returns a reference to the parameters.
    #[inline]
    pub fn params(&self) -> &GarmanKohlhagenParams<T> {
        &self.params
    }

    /// Returns d1.
    #[inline]
    pub fn d1(&self) -> T {
        self.d1
    }

    /// Returns d2.
    #[inline]
    pub fn d2(&self) -> T {
        self.d2
    }

    /// Option price in domestic currency per unit of foreign notional.
    pub fn price(&self, option_type: OptionType) -> T {
        let p = &self.params;
        match option_type {
            OptionType::Call => {
                p.spot * self.df_foreign * norm_cdf(self.d1)
                    - p.strike * self.df_domestic * norm_cdf(self.d2)
            }
            OptionType::Put => {
                p.strike * self.df_domestic * norm_cdf(-self.d2)
                    - p.spot * self.df_foreign * norm_cdf(-self.d1)
            }
        }
    }

    /// Spot delta, ∂V/∂S.
    pub fn delta(&self, option_type: OptionType) -> T {
        match option_type {
            // Δ_call = e^(-rf*T) * N(d1)
            OptionType::Call => self.df_foreign * norm_cdf(self.d1),
            // Δ_put = -e^(-rf*T) * N(-d1)
            OptionType::Put => -self.df_foreign * norm_cdf(-self.d1),
        }
    }

    /// Gamma, ∂²V/∂S². Same for calls and puts.
    pub fn gamma(&self) -> T {
        // Γ = e^(-rf*T) * φ(d1) / (S * σ * √T)
        self.df_foreign * norm_pdf(self.d1)
            / (self.params.spot * self.params.volatility * self.sqrt_t)
    }

    /// Vega, ∂V/∂σ per unit of volatility. Same for calls and puts.
    pub fn vega(&self) -> T {
        // ν = S * e^(-rf*T) * φ(d1) * √T
        self.params.spot * self.df_foreign * norm_pdf(self.d1) * self.sqrt_t
    }
}

/// Convenience function for a Garman-Kohlhagen call price.
///
/// # Examples
///
/// ```
/// use pricer_models::analytical::garman_kohlhagen::fx_call_price;
///
/// let price = fx_call_price(1.10, 1.12, 0.03, 0.01, 0.15, 1.0).unwrap();
/// assert!(price > 0.0);
/// ```
pub fn fx_call_price<T: Float>(
    spot: T,
    strike: T,
    rate_domestic: T,
    rate_foreign: T,
    volatility: T,
    expiry: T,
) -> Result<T, AnalyticalError> {
    let params =
        GarmanKohlhagenParams::new(spot, strike, rate_domestic, rate_foreign, volatility, expiry)?;
    Ok(GarmanKohlhagen::new(params).price(OptionType::Call))
}

/// Convenience function for a Garman-Kohlhagen put price.
pub fn fx_put_price<T: Float>(
    spot: T,
    strike: T,
    rate_domestic: T,
    rate_foreign: T,
    volatility: T,
    expiry: T,
) -> Result<T, AnalyticalError> {
    let params =
        GarmanKohlhagenParams::new(spot, strike, rate_domestic, rate_foreign, volatility, expiry)?;
    Ok(GarmanKohlhagen::new(params).price(OptionType::Put))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> GarmanKohlhagen<f64> {
        GarmanKohlhagen::new(GarmanKohlhagenParams::new(100.0, 100.0, 0.05, 0.01, 0.2, 1.0).unwrap())
    }

    #[test]
    fn test_reference_price() {
        // S=K=100, rd=5%, rf=1%, σ=20%, T=1
        let m = model();
        assert_relative_eq!(m.price(OptionType::Call), 9.8262978, epsilon = 1e-6);
        assert_relative_eq!(m.price(OptionType::Put), 5.9442569, epsilon = 1e-6);
    }

    #[test]
    fn test_put_call_parity() {
        let m = model();
        let lhs = m.price(OptionType::Call) - m.price(OptionType::Put);
        let rhs = 100.0 * (-0.01_f64).exp() - 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(lhs, rhs, epsilon = 1e-12);
    }

    #[test]
    fn test_delta_parity() {
        let m = model();
        let diff = m.delta(OptionType::Call) - m.delta(OptionType::Put);
        assert_relative_eq!(diff, (-0.01_f64).exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_greeks_match_finite_differences() {
        let price = |s: f64, v: f64| {
            GarmanKohlhagen::new(GarmanKohlhagenParams::new(s, 100.0, 0.05, 0.01, v, 1.0).unwrap())
                .price(OptionType::Call)
        };
        let m = model();
        let h = 1e-3;
        let fd_delta = (price(100.0 + h, 0.2) - price(100.0 - h, 0.2)) / (2.0 * h);
        let fd_gamma =
            (price(100.0 + h, 0.2) - 2.0 * price(100.0, 0.2) + price(100.0 - h, 0.2)) / (h * h);
        let fd_vega = (price(100.0, 0.2 + 1e-5) - price(100.0, 0.2 - 1e-5)) / 2e-5;

        assert_relative_eq!(m.delta(OptionType::Call), fd_delta, epsilon = 1e-7);
        assert_relative_eq!(m.gamma(), fd_gamma, epsilon = 1e-5);
        assert_relative_eq!(m.vega(), fd_vega, epsilon = 1e-5);
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            GarmanKohlhagenParams::new(0.0, 1.0, 0.0, 0.0, 0.1, 1.0),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            GarmanKohlhagenParams::new(1.0, -1.0, 0.0, 0.0, 0.1, 1.0),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
        assert!(matches!(
            GarmanKohlhagenParams::new(1.0, 1.0, 0.0, 0.0, 0.0, 1.0),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(matches!(
            GarmanKohlhagenParams::new(1.0, 1.0, 0.0, 0.0, 0.1, 0.0),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
        assert!(GarmanKohlhagenParams::new(f64::NAN, 1.0, 0.0, 0.0, 0.1, 1.0).is_err());
    }

    #[test]
    fn test_forward() {
        let p = GarmanKohlhagenParams::new(1.10, 1.12, 0.03, 0.01, 0.15, 2.0).unwrap();
        assert_relative_eq!(p.forward(), 1.10 * (0.04_f64).exp(), epsilon = 1e-14);
    }
}
