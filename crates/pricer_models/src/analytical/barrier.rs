//! Closed-form single barrier options (Reiner-Rubinstein, in Haug's notation).
//!
//! With cost of carry b = rd - rf:
//!
//! ```text
//! μ = (b - σ²/2) / σ²
//! λ = sqrt(μ² + 2·rd/σ²)
//! x1 = ln(S/K)/(σ√T) + (1+μ)σ√T      x2 = ln(S/H)/(σ√T) + (1+μ)σ√T
//! y1 = ln(H²/(SK))/(σ√T) + (1+μ)σ√T  y2 = ln(H/S)/(σ√T) + (1+μ)σ√T
//! z  = ln(H/S)/(σ√T) + λσ√T
//! ```
//!
//! The building blocks A..F combine per barrier type, side and strike
//! position relative to the barrier. Barriers are monitored continuously.
//!
//! # Examples
//!
//! ```
//! use pricer_models::analytical::barrier::{barrier_price, BarrierParams};
//! use pricer_models::analytical::garman_kohlhagen::fx_call_price;
//! use pricer_models::instruments::{BarrierType, OptionType};
//!
//! let params = BarrierParams {
//!     spot: 100.0,
//!     strike: 100.0,
//!     barrier: 120.0,
//!     rebate: 0.0,
//!     rate_domestic: 0.05,
//!     rate_foreign: 0.01,
//!     volatility: 0.2,
//!     expiry: 1.0,
//! };
//!
//! let ko = barrier_price(OptionType::Call, BarrierType::UpOut, &params).unwrap();
//! let ki = barrier_price(OptionType::Call, BarrierType::UpIn, &params).unwrap();
//! let vanilla = fx_call_price(100.0, 100.0, 0.05, 0.01, 0.2, 1.0).unwrap();
//! assert!((ko + ki - vanilla).abs() < 1e-10);
//! ```

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::instruments::{BarrierType, OptionType};

/// Inputs of the single barrier formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierParams {
    /// Spot exchange rate (domestic per foreign).
    pub spot: f64,
    /// Strike.
    pub strike: f64,
    /// Barrier level.
    pub barrier: f64,
    /// Cash rebate paid at expiry (knock-in) or on touch (knock-out).
    pub rebate: f64,
    /// Domestic rate (continuous compounding).
    pub rate_domestic: f64,
    /// Foreign rate (continuous compounding).
    pub rate_foreign: f64,
    /// Volatility.
    pub volatility: f64,
    /// Time to expiry in years.
    pub expiry: f64,
}

impl BarrierParams {
    fn validate(&self, barrier_type: BarrierType) -> Result<(), AnalyticalError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(AnalyticalError::InvalidSpot { spot: self.spot });
        }
        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(AnalyticalError::InvalidStrike {
                strike: self.strike,
            });
        }
        if !(self.volatility.is_finite() && self.volatility > 0.0) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        if !(self.expiry.is_finite() && self.expiry > 0.0) {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: self.expiry,
            });
        }
        if !(self.barrier.is_finite() && self.barrier > 0.0) {
            return Err(AnalyticalError::InvalidBarrier {
                message: format!("barrier level must be positive, got {}", self.barrier),
            });
        }
        if barrier_type.triggered(self.spot, self.barrier) {
            return Err(AnalyticalError::InvalidBarrier {
                message: format!(
                    "barrier touched: {} barrier {} with spot {}",
                    barrier_type, self.barrier, self.spot
                ),
            });
        }
        Ok(())
    }
}

/// Prices a continuously monitored single barrier option.
///
/// # Errors
///
/// `AnalyticalError` when an input is out of range or spot has already
/// reached the barrier.
pub fn barrier_price(
    option_type: OptionType,
    barrier_type: BarrierType,
    p: &BarrierParams,
) -> Result<f64, AnalyticalError> {
    p.validate(barrier_type)?;

    let (s, k, h) = (p.spot, p.strike, p.barrier);
    let (r, q, sigma, t) = (p.rate_domestic, p.rate_foreign, p.volatility, p.expiry);

    let phi = option_type.sign();
    let eta = if barrier_type.is_up() { -1.0 } else { 1.0 };

    let sigma_sq = sigma * sigma;
    let std_dev = sigma * t.sqrt();
    let mu = (r - q - sigma_sq / 2.0) / sigma_sq;
    let lambda = (mu * mu + 2.0 * r / sigma_sq).sqrt();
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();

    let carry = (1.0 + mu) * std_dev;
    let x1 = (s / k).ln() / std_dev + carry;
    let x2 = (s / h).ln() / std_dev + carry;
    let y1 = (h * h / (s * k)).ln() / std_dev + carry;
    let y2 = (h / s).ln() / std_dev + carry;
    let z = (h / s).ln() / std_dev + lambda * std_dev;

    let ln_hs = (h / s).ln();
    let hs_2mu = (2.0 * mu * ln_hs).exp();
    let hs_2mu1 = (2.0 * (mu + 1.0) * ln_hs).exp();

    let a = phi * s * df_q * norm_cdf(phi * x1) - phi * k * df_r * norm_cdf(phi * (x1 - std_dev));
    let b = phi * s * df_q * norm_cdf(phi * x2) - phi * k * df_r * norm_cdf(phi * (x2 - std_dev));
    let c = phi * s * df_q * hs_2mu1 * norm_cdf(eta * y1)
        - phi * k * df_r * hs_2mu * norm_cdf(eta * (y1 - std_dev));
    let d = phi * s * df_q * hs_2mu1 * norm_cdf(eta * y2)
        - phi * k * df_r * hs_2mu * norm_cdf(eta * (y2 - std_dev));
    let e = p.rebate
        * df_r
        * (norm_cdf(eta * (x2 - std_dev)) - hs_2mu * norm_cdf(eta * (y2 - std_dev)));
    let f = p.rebate
        * (((mu + lambda) * ln_hs).exp() * norm_cdf(eta * z)
            + ((mu - lambda) * ln_hs).exp() * norm_cdf(eta * (z - 2.0 * lambda * std_dev)));

    use BarrierType::*;
    use OptionType::*;
    let strike_above = k >= h;
    let value = match (barrier_type, option_type, strike_above) {
        (DownIn, Call, true) => c + e,
        (DownIn, Call, false) => a - b + d + e,
        (UpIn, Call, true) => a + e,
        (UpIn, Call, false) => b - c + d + e,
        (DownIn, Put, true) => b - c + d + e,
        (DownIn, Put, false) => a + e,
        (UpIn, Put, true) => a - b + d + e,
        (UpIn, Put, false) => c + e,
        (DownOut, Call, true) => a - c + f,
        (DownOut, Call, false) => b - d + f,
        (UpOut, Call, true) => f,
        (UpOut, Call, false) => a - b + c - d + f,
        (DownOut, Put, true) => a - b + c - d + f,
        (DownOut, Put, false) => f,
        (UpOut, Put, true) => b - d + f,
        (UpOut, Put, false) => a - c + f,
    };

    if !value.is_finite() {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("barrier price evaluated to {}", value),
        });
    }
    Ok(value.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::garman_kohlhagen::{fx_call_price, fx_put_price};
    use approx::assert_relative_eq;

    fn params(strike: f64, barrier: f64) -> BarrierParams {
        BarrierParams {
            spot: 100.0,
            strike,
            barrier,
            rebate: 0.0,
            rate_domestic: 0.08,
            rate_foreign: 0.04,
            volatility: 0.25,
            expiry: 0.5,
        }
    }

    #[test]
    fn test_haug_reference_values() {
        // Haug (2007), Table 4-13: S=100, b=0.04, r=0.08, T=0.5, σ=0.25, rebate=3
        let mut p = params(90.0, 95.0);
        p.rebate = 3.0;
        let down_out_call = barrier_price(OptionType::Call, BarrierType::DownOut, &p).unwrap();
        assert_relative_eq!(down_out_call, 9.0246, epsilon = 1e-3);

        let mut p = params(90.0, 105.0);
        p.rebate = 3.0;
        let up_out_call = barrier_price(OptionType::Call, BarrierType::UpOut, &p).unwrap();
        assert_relative_eq!(up_out_call, 2.6789, epsilon = 1e-3);

        let mut p = params(90.0, 95.0);
        p.rebate = 3.0;
        let down_in_call = barrier_price(OptionType::Call, BarrierType::DownIn, &p).unwrap();
        assert_relative_eq!(down_in_call, 7.7627, epsilon = 1e-3);
    }

    #[test]
    fn test_in_out_parity_calls() {
        for (strike, barrier, out, inn) in [
            (100.0, 90.0, BarrierType::DownOut, BarrierType::DownIn),
            (85.0, 90.0, BarrierType::DownOut, BarrierType::DownIn),
            (100.0, 120.0, BarrierType::UpOut, BarrierType::UpIn),
            (125.0, 120.0, BarrierType::UpOut, BarrierType::UpIn),
        ] {
            let p = params(strike, barrier);
            let total = barrier_price(OptionType::Call, out, &p).unwrap()
                + barrier_price(OptionType::Call, inn, &p).unwrap();
            let vanilla = fx_call_price(100.0, strike, 0.08, 0.04, 0.25, 0.5).unwrap();
            assert_relative_eq!(total, vanilla, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_in_out_parity_puts() {
        for (strike, barrier, out, inn) in [
            (100.0, 90.0, BarrierType::DownOut, BarrierType::DownIn),
            (85.0, 90.0, BarrierType::DownOut, BarrierType::DownIn),
            (100.0, 120.0, BarrierType::UpOut, BarrierType::UpIn),
            (125.0, 120.0, BarrierType::UpOut, BarrierType::UpIn),
        ] {
            let p = params(strike, barrier);
            let total = barrier_price(OptionType::Put, out, &p).unwrap()
                + barrier_price(OptionType::Put, inn, &p).unwrap();
            let vanilla = fx_put_price(100.0, strike, 0.08, 0.04, 0.25, 0.5).unwrap();
            assert_relative_eq!(total, vanilla, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_knock_out_never_exceeds_vanilla() {
        let p = params(100.0, 110.0);
        let ko = barrier_price(OptionType::Call, BarrierType::UpOut, &p).unwrap();
        let vanilla = fx_call_price(100.0, 100.0, 0.08, 0.04, 0.25, 0.5).unwrap();
        assert!(ko >= 0.0 && ko < vanilla);
    }

    #[test]
    fn test_up_out_call_with_strike_above_barrier_is_rebate_only() {
        let p = params(130.0, 120.0);
        let ko = barrier_price(OptionType::Call, BarrierType::UpOut, &p).unwrap();
        assert_eq!(ko, 0.0);
    }

    #[test]
    fn test_touched_barrier_rejected() {
        let p = params(100.0, 100.0);
        assert!(matches!(
            barrier_price(OptionType::Call, BarrierType::UpOut, &p),
            Err(AnalyticalError::InvalidBarrier { .. })
        ));
        let p = params(100.0, 101.0);
        assert!(barrier_price(OptionType::Put, BarrierType::DownIn, &p).is_err());
    }
}
