//! Double barrier options via the Ikeda-Kunitomo series.
//!
//! The knock-out value is a truncated image series over n ∈ [-N, N]; the
//! knock-in value follows from in/out parity against the Garman-Kohlhagen
//! vanilla. Only pure knock-in and knock-out structures have a closed form
//! here; `Kiko` and `Koki` are rejected.

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use super::garman_kohlhagen::{GarmanKohlhagen, GarmanKohlhagenParams};
use crate::instruments::{DoubleBarrierType, OptionType};

/// Number of series terms on each side of zero used by default.
pub const DEFAULT_SERIES_TERMS: usize = 5;

/// Inputs of the double barrier formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleBarrierParams {
    /// Spot exchange rate.
    pub spot: f64,
    /// Strike.
    pub strike: f64,
    /// Lower barrier level.
    pub lower: f64,
    /// Upper barrier level.
    pub upper: f64,
    /// Domestic rate.
    pub rate_domestic: f64,
    /// Foreign rate.
    pub rate_foreign: f64,
    /// Volatility.
    pub volatility: f64,
    /// Time to expiry in years.
    pub expiry: f64,
}

impl DoubleBarrierParams {
    fn vanilla(&self) -> Result<GarmanKohlhagen<f64>, AnalyticalError> {
        let params = GarmanKohlhagenParams::new(
            self.spot,
            self.strike,
            self.rate_domestic,
            self.rate_foreign,
            self.volatility,
            self.expiry,
        )?;
        Ok(GarmanKohlhagen::new(params))
    }

    fn check_barriers(&self) -> Result<(), AnalyticalError> {
        if !(self.lower.is_finite() && self.upper.is_finite() && self.lower > 0.0) {
            return Err(AnalyticalError::InvalidBarrier {
                message: format!(
                    "barrier levels must be positive, got [{}, {}]",
                    self.lower, self.upper
                ),
            });
        }
        if self.lower >= self.upper {
            return Err(AnalyticalError::InvalidBarrier {
                message: format!(
                    "lower barrier {} must be below upper barrier {}",
                    self.lower, self.upper
                ),
            });
        }
        if self.spot <= self.lower || self.spot >= self.upper {
            return Err(AnalyticalError::InvalidBarrier {
                message: format!(
                    "barrier touched: spot {} outside ({}, {})",
                    self.spot, self.lower, self.upper
                ),
            });
        }
        Ok(())
    }
}

/// Prices a continuously monitored double barrier option.
///
/// # Arguments
///
/// * `series_terms` - truncation N of the image series (must be > 0)
///
/// # Errors
///
/// `AnalyticalError::InvalidBarrier` for `Kiko`/`Koki`, for misordered
/// barriers, or when spot is not strictly between them.
///
/// # Examples
///
/// ```
/// use pricer_models::analytical::double_barrier::{double_barrier_price, DoubleBarrierParams};
/// use pricer_models::instruments::{DoubleBarrierType, OptionType};
///
/// let params = DoubleBarrierParams {
///     spot: 100.0,
///     strike: 100.0,
///     lower: 80.0,
///     upper: 120.0,
///     rate_domestic: 0.05,
///     rate_foreign: 0.01,
///     volatility: 0.2,
///     expiry: 0.5,
/// };
/// let ko = double_barrier_price(OptionType::Call, DoubleBarrierType::KnockOut, &params, 5).unwrap();
/// assert!((ko - 2.16227).abs() < 1e-4);
/// ```
pub fn double_barrier_price(
    option_type: OptionType,
    barrier_type: DoubleBarrierType,
    p: &DoubleBarrierParams,
    series_terms: usize,
) -> Result<f64, AnalyticalError> {
    let vanilla = p.vanilla()?;
    p.check_barriers()?;
    if series_terms == 0 {
        return Err(AnalyticalError::NumericalInstability {
            message: "double barrier series needs at least one term".to_string(),
        });
    }

    let knock_out = knock_out_value(option_type, p, series_terms);
    let value = match barrier_type {
        DoubleBarrierType::KnockOut => knock_out,
        DoubleBarrierType::KnockIn => vanilla.price(option_type) - knock_out,
        DoubleBarrierType::Kiko | DoubleBarrierType::Koki => {
            return Err(AnalyticalError::InvalidBarrier {
                message: format!("{} has no closed-form double barrier value", barrier_type),
            })
        }
    };

    if !value.is_finite() {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("double barrier price evaluated to {}", value),
        });
    }
    Ok(value.max(0.0))
}

fn knock_out_value(option_type: OptionType, p: &DoubleBarrierParams, series_terms: usize) -> f64 {
    let (s, k, l, u) = (p.spot, p.strike, p.lower, p.upper);

    // The payoff region lies entirely outside the corridor.
    match option_type {
        OptionType::Call if k >= u => return 0.0,
        OptionType::Put if k <= l => return 0.0,
        _ => {}
    }

    let (r, q, sigma, t) = (p.rate_domestic, p.rate_foreign, p.volatility, p.expiry);
    let std_dev = sigma * t.sqrt();
    let carry = r - q;
    let mu1 = 2.0 * carry / (sigma * sigma) + 1.0;
    let drift = (carry + 0.5 * sigma * sigma) * t / std_dev;
    let ln_ul = (u / l).ln();
    let n_max = series_terms as i64;

    let mut acc1 = 0.0;
    let mut acc2 = 0.0;
    for n in -n_max..=n_max {
        let nf = n as f64;
        let up_2n = (2.0 * nf * ln_ul).exp();
        let down_2n = (-2.0 * nf * ln_ul).exp();
        let mirror = (l / s) * (-nf * ln_ul).exp();
        let m1 = (mu1 * nf * ln_ul).exp();
        let m2 = ((mu1 - 2.0) * nf * ln_ul).exp();
        let m3 = mirror.powf(mu1);
        let m4 = mirror.powf(mu1 - 2.0);

        let d = |num: f64| num.ln() / std_dev + drift;
        match option_type {
            OptionType::Call => {
                let d1 = d(s * up_2n / k);
                let d2 = d(s * up_2n / u);
                let d3 = d(l * l * down_2n / (k * s));
                let d4 = d(l * l * down_2n / (u * s));
                acc1 += m1 * (norm_cdf(d1) - norm_cdf(d2)) - m3 * (norm_cdf(d3) - norm_cdf(d4));
                acc2 += m2 * (norm_cdf(d1 - std_dev) - norm_cdf(d2 - std_dev))
                    - m4 * (norm_cdf(d3 - std_dev) - norm_cdf(d4 - std_dev));
            }
            OptionType::Put => {
                let y1 = d(s * up_2n / l);
                let y2 = d(s * up_2n / k);
                let y3 = d(l * down_2n / s);
                let y4 = d(l * l * down_2n / (k * s));
                acc1 += m2 * (norm_cdf(y1 - std_dev) - norm_cdf(y2 - std_dev))
                    - m4 * (norm_cdf(y3 - std_dev) - norm_cdf(y4 - std_dev));
                acc2 += m1 * (norm_cdf(y1) - norm_cdf(y2)) - m3 * (norm_cdf(y3) - norm_cdf(y4));
            }
        }
    }

    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();
    match option_type {
        OptionType::Call => s * df_q * acc1 - k * df_r * acc2,
        OptionType::Put => k * df_r * acc1 - s * df_q * acc2,
    }
}
