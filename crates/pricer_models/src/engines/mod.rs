//! Pricing engines.
//!
//! [`PricingEngine`] is an enum so instruments dispatch statically. Each
//! variant owns the process it reads market data from.
//!
//! | Engine | Instruments | Exercise | Time measure |
//! |---|---|---|---|
//! | `AnalyticEuropean` | vanilla | European | vol time, rates rescaled |
//! | `AnalyticBarrier` | single barrier | European | rate time |
//! | `AnalyticDoubleBarrier` | knock-in/knock-out corridor | European | rate time |
//! | `BinomialAmerican` | vanilla | American | rate time |

mod error;

pub use error::EngineError;

use crate::analytical::barrier::{barrier_price, BarrierParams};
use crate::analytical::binomial::{crr_american, crr_american_vega, DEFAULT_STEPS};
use crate::analytical::double_barrier::{
    double_barrier_price, DoubleBarrierParams, DEFAULT_SERIES_TERMS,
};
use crate::analytical::GarmanKohlhagen;
use crate::instruments::{
    DoubleBarrierType, Exercise, FxBarrierOption, FxDoubleBarrierOption, FxVanillaOption,
    OptionResults,
};
use crate::process::GarmanKohlhagenProcess;

const BARRIER_EXERCISE: &str = "analytic barrier engines require European exercise";
const DOUBLE_BARRIER_TYPES: &str =
    "analytic double barrier engine supports only knock-in and knock-out options";

/// Engine attached to an instrument.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{BlackConstantVol, FlatForward};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::engines::PricingEngine;
/// use pricer_models::process::GarmanKohlhagenProcess;
///
/// let today = Date::from_ymd(2024, 1, 2).unwrap();
/// let curve = FlatForward::new(today, 0.02, DayCountConvention::Actual360).unwrap();
/// let vol = BlackConstantVol::new(today, 0.1, DayCountConvention::ActualActualIsda).unwrap();
/// let process = GarmanKohlhagenProcess::new(1.3, curve, curve, vol).unwrap();
///
/// let engine = PricingEngine::binomial_american(process, 400);
/// assert_eq!(engine.name(), "binomial American");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PricingEngine {
    /// Garman-Kohlhagen closed form.
    AnalyticEuropean {
        /// Market process
        process: GarmanKohlhagenProcess,
    },
    /// Reiner-Rubinstein single barrier closed form.
    AnalyticBarrier {
        /// Market process
        process: GarmanKohlhagenProcess,
    },
    /// Ikeda-Kunitomo double barrier series.
    AnalyticDoubleBarrier {
        /// Market process
        process: GarmanKohlhagenProcess,
        /// Image series truncation
        series_terms: usize,
    },
    /// Cox-Ross-Rubinstein lattice with early exercise.
    BinomialAmerican {
        /// Market process
        process: GarmanKohlhagenProcess,
        /// Lattice time steps
        steps: usize,
    },
}

impl PricingEngine {
    /// Analytic European engine.
    pub fn analytic_european(process: GarmanKohlhagenProcess) -> Self {
        PricingEngine::AnalyticEuropean { process }
    }

    /// Analytic single barrier engine.
    pub fn analytic_barrier(process: GarmanKohlhagenProcess) -> Self {
        PricingEngine::AnalyticBarrier { process }
    }

    /// Analytic double barrier engine with the default series length.
    pub fn analytic_double_barrier(process: GarmanKohlhagenProcess) -> Self {
        PricingEngine::AnalyticDoubleBarrier {
            process,
            series_terms: DEFAULT_SERIES_TERMS,
        }
    }

    /// Binomial engine for American exercise.
    pub fn binomial_american(process: GarmanKohlhagenProcess, steps: usize) -> Self {
        PricingEngine::BinomialAmerican { process, steps }
    }

    /// Binomial engine with the default number of steps.
    pub fn binomial_american_default(process: GarmanKohlhagenProcess) -> Self {
        Self::binomial_american(process, DEFAULT_STEPS)
    }

    /// Engine name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            PricingEngine::AnalyticEuropean { .. } => "analytic European",
            PricingEngine::AnalyticBarrier { .. } => "analytic barrier",
            PricingEngine::AnalyticDoubleBarrier { .. } => "analytic double barrier",
            PricingEngine::BinomialAmerican { .. } => "binomial American",
        }
    }

    fn unsupported(&self, instrument: &str) -> EngineError {
        EngineError::Unsupported(format!("{} engine cannot price {}", self.name(), instrument))
    }

    /// Values a vanilla option.
    pub(crate) fn calculate_vanilla(
        &self,
        option: &FxVanillaOption,
    ) -> Result<OptionResults, EngineError> {
        let payoff = option.payoff();
        let exercise = option.exercise();
        match self {
            PricingEngine::AnalyticEuropean { process } => {
                if !exercise.is_european() {
                    return Err(EngineError::Unsupported(format!(
                        "analytic European engine cannot price {} exercise",
                        exercise.name()
                    )));
                }
                let inputs = process.inputs(exercise.last_date(), payoff.strike())?;
                let gk = GarmanKohlhagen::new(inputs.vol_time_params()?);
                let side = payoff.option_type();
                Ok(OptionResults {
                    value: gk.price(side),
                    delta: Some(gk.delta(side)),
                    gamma: Some(gk.gamma()),
                    vega: Some(gk.vega()),
                })
            }
            PricingEngine::BinomialAmerican { process, steps } => {
                let Exercise::American { .. } = exercise else {
                    return Err(EngineError::Unsupported(format!(
                        "binomial American engine cannot price {} exercise",
                        exercise.name()
                    )));
                };
                let inputs = process.inputs(exercise.last_date(), payoff.strike())?;
                let params = inputs.rate_time_params()?;
                let side = payoff.option_type();
                let lattice = crr_american(side, &params, *steps)?;
                let vega = crr_american_vega(side, &params, *steps)?;
                Ok(OptionResults {
                    value: lattice.price,
                    delta: Some(lattice.delta),
                    gamma: Some(lattice.gamma),
                    vega: Some(vega),
                })
            }
            _ => Err(self.unsupported("a vanilla option")),
        }
    }

    /// Values a single barrier option.
    pub(crate) fn calculate_barrier(
        &self,
        option: &FxBarrierOption,
    ) -> Result<OptionResults, EngineError> {
        let PricingEngine::AnalyticBarrier { process } = self else {
            return Err(self.unsupported("a barrier option"));
        };
        let exercise = option.exercise();
        if !exercise.is_european() {
            return Err(EngineError::Unsupported(BARRIER_EXERCISE.to_string()));
        }
        let payoff = option.payoff();
        let inputs = process.inputs(exercise.last_date(), payoff.strike())?;
        let gk = inputs.rate_time_params()?;
        let params = BarrierParams {
            spot: gk.spot,
            strike: gk.strike,
            barrier: option.barrier(),
            rebate: option.rebate(),
            rate_domestic: gk.rate_domestic,
            rate_foreign: gk.rate_foreign,
            volatility: gk.volatility,
            expiry: gk.expiry,
        };
        let value = barrier_price(payoff.option_type(), option.barrier_type(), &params)?;
        Ok(OptionResults::value_only(value))
    }

    /// Values a double barrier option.
    pub(crate) fn calculate_double_barrier(
        &self,
        option: &FxDoubleBarrierOption,
    ) -> Result<OptionResults, EngineError> {
        let PricingEngine::AnalyticDoubleBarrier {
            process,
            series_terms,
        } = self
        else {
            return Err(self.unsupported("a double barrier option"));
        };
        let exercise = option.exercise();
        if !exercise.is_european() {
            return Err(EngineError::Unsupported(BARRIER_EXERCISE.to_string()));
        }
        if matches!(
            option.barrier_type(),
            DoubleBarrierType::Kiko | DoubleBarrierType::Koki
        ) {
            return Err(EngineError::Unsupported(DOUBLE_BARRIER_TYPES.to_string()));
        }
        let payoff = option.payoff();
        let inputs = process.inputs(exercise.last_date(), payoff.strike())?;
        let gk = inputs.rate_time_params()?;
        let params = DoubleBarrierParams {
            spot: gk.spot,
            strike: gk.strike,
            lower: option.lower(),
            upper: option.upper(),
            rate_domestic: gk.rate_domestic,
            rate_foreign: gk.rate_foreign,
            volatility: gk.volatility,
            expiry: gk.expiry,
        };
        let value = double_barrier_price(
            payoff.option_type(),
            option.barrier_type(),
            &params,
            *series_terms,
        )?;
        Ok(OptionResults::value_only(value))
    }
}
