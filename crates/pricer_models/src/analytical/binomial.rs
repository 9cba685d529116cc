//! Cox-Ross-Rubinstein lattice for American FX options.
//!
//! The foreign rate enters as a continuous yield: the risk-neutral up
//! probability is p = (e^{(rd - rf)Δt} - d) / (u - d) with u = e^{σ√Δt},
//! d = 1/u, and each step discounts at rd. Delta and gamma are read off
//! the first two lattice levels; vega is a central difference in σ.

use super::error::AnalyticalError;
use super::garman_kohlhagen::GarmanKohlhagenParams;
use crate::instruments::OptionType;

/// Default number of time steps.
pub const DEFAULT_STEPS: usize = 801;

/// Volatility bump used for the finite-difference vega.
const VEGA_BUMP: f64 = 1e-4;

/// Value and lattice Greeks at the root node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeResult {
    /// Option value.
    pub price: f64,
    /// ∂V/∂S from the first step.
    pub delta: f64,
    /// ∂²V/∂S² from the second step.
    pub gamma: f64,
}

/// Prices an American option on a CRR lattice.
///
/// # Errors
///
/// `NumericalInstability` when fewer than two steps are requested or the
/// up probability leaves [0, 1] (Δt too coarse for the carry).
///
/// # Examples
///
/// ```
/// use pricer_models::analytical::binomial::crr_american;
/// use pricer_models::analytical::GarmanKohlhagenParams;
/// use pricer_models::instruments::OptionType;
///
/// let params = GarmanKohlhagenParams::new(100.0, 100.0, 0.05, 0.01, 0.2, 1.0).unwrap();
/// let put = crr_american(OptionType::Put, &params, 500).unwrap();
/// assert!(put.price > 5.94);
/// assert!(put.delta < 0.0);
/// ```
pub fn crr_american(
    option_type: OptionType,
    params: &GarmanKohlhagenParams<f64>,
    steps: usize,
) -> Result<LatticeResult, AnalyticalError> {
    if steps < 2 {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("binomial lattice needs at least 2 steps, got {}", steps),
        });
    }

    let s = params.spot;
    let k = params.strike;
    let phi = option_type.sign();

    let dt = params.expiry / steps as f64;
    let u = (params.volatility * dt.sqrt()).exp();
    let d = 1.0 / u;
    let growth = ((params.rate_domestic - params.rate_foreign) * dt).exp();
    let p = (growth - d) / (u - d);
    if !(0.0..=1.0).contains(&p) {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("binomial up probability {} outside [0, 1]", p),
        });
    }
    let disc = (-params.rate_domestic * dt).exp();
    let ln_u = u.ln();

    // Node j at step i carries spot S·u^(2j - i).
    let node = |i: usize, j: usize| s * ((2.0 * j as f64 - i as f64) * ln_u).exp();
    let exercise = |spot: f64| (phi * (spot - k)).max(0.0);

    let mut values: Vec<f64> = (0..=steps).map(|j| exercise(node(steps, j))).collect();
    let mut level2 = [0.0; 3];
    let mut level1 = [0.0; 2];

    for i in (0..steps).rev() {
        for j in 0..=i {
            let continuation = disc * (p * values[j + 1] + (1.0 - p) * values[j]);
            values[j] = continuation.max(exercise(node(i, j)));
        }
        match i {
            2 => level2.copy_from_slice(&values[..3]),
            1 => level1.copy_from_slice(&values[..2]),
            _ => {}
        }
    }

    let (su, sd) = (s * u, s * d);
    let (suu, sdd) = (s * u * u, s * d * d);
    let delta = (level1[1] - level1[0]) / (su - sd);
    let delta_up = (level2[2] - level2[1]) / (suu - s);
    let delta_down = (level2[1] - level2[0]) / (s - sdd);
    let gamma = (delta_up - delta_down) / (0.5 * (suu - sdd));

    let price = values[0];
    if !price.is_finite() {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("binomial price evaluated to {}", price),
        });
    }
    Ok(LatticeResult {
        price,
        delta,
        gamma,
    })
}

/// Vega of the lattice price by a central volatility bump.
///
/// # Errors
///
/// Propagates lattice errors for either bumped volatility.
pub fn crr_american_vega(
    option_type: OptionType,
    params: &GarmanKohlhagenParams<f64>,
    steps: usize,
) -> Result<f64, AnalyticalError> {
    let bumped = |vol: f64| -> Result<f64, AnalyticalError> {
        let mut p = *params;
        p.volatility = vol;
        Ok(crr_american(option_type, &p, steps)?.price)
    };
    let up = bumped(params.volatility + VEGA_BUMP)?;
    let down = bumped(params.volatility - VEGA_BUMP)?;
    Ok((up - down) / (2.0 * VEGA_BUMP))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::GarmanKohlhagen;
    use approx::assert_relative_eq;

    fn params(rate_foreign: f64) -> GarmanKohlhagenParams<f64> {
        GarmanKohlhagenParams::new(100.0, 100.0, 0.05, rate_foreign, 0.2, 1.0).unwrap()
    }

    #[test]
    fn test_american_put_at_least_european() {
        let p = params(0.01);
        let european = GarmanKohlhagen::new(p).price(OptionType::Put);
        let american = crr_american(OptionType::Put, &p, 500).unwrap();
        assert!(american.price >= european - 1e-8);
        assert_relative_eq!(american.price, 6.365354975811997, epsilon = 1e-9);
    }

    #[test]
    fn test_call_without_foreign_rate_matches_european() {
        // Early exercise of a call is never optimal when rf = 0.
        let p = params(0.0);
        let gk = GarmanKohlhagen::new(p);
        let lattice = crr_american(OptionType::Call, &p, 500).unwrap();
        assert_relative_eq!(lattice.price, gk.price(OptionType::Call), epsilon = 1e-2);
        assert_relative_eq!(lattice.delta, gk.delta(OptionType::Call), epsilon = 1e-3);
        assert_relative_eq!(lattice.gamma, gk.gamma(), epsilon = 1e-3);
    }

    #[test]
    fn test_vega_close_to_analytic() {
        let p = params(0.0);
        let vega = crr_american_vega(OptionType::Call, &p, 500).unwrap();
        assert_relative_eq!(vega, GarmanKohlhagen::new(p).vega(), epsilon = 0.1);
    }

    #[test]
    fn test_put_delta_bounds() {
        let result = crr_american(OptionType::Put, &params(0.01), 200).unwrap();
        assert!(result.delta < 0.0 && result.delta > -1.0);
        assert!(result.gamma > 0.0);
    }

    #[test]
    fn test_too_few_steps() {
        assert!(crr_american(OptionType::Call, &params(0.01), 1).is_err());
    }
}
