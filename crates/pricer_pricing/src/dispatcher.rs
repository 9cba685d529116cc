//! Single-contract pricing.
//!
//! [`PricingDispatcher`] turns a [`NormalizedContractSpec`] into market
//! objects (two flat curves, a flat vol and a Garman-Kohlhagen process),
//! picks the instrument and engine for the contract's product family and
//! scales the engine's per-unit figures to the contract notional.

use adapter_contract::{
    BarrierDirection, ContractBuilder, ContractError, ExerciseStyle, ExoticType,
    NormalizedContractSpec, OptionSide, RawContractRequest, ReferenceRates,
};
use pricer_core::market_data::{BlackConstantVol, FlatForward};
use pricer_core::types::{BusinessDayConvention, Calendar, Date, DayCountConvention};
use pricer_models::analytical::binomial::DEFAULT_STEPS;
use pricer_models::engines::{EngineError, PricingEngine};
use pricer_models::instruments::{
    BarrierType, DoubleBarrierType, Exercise, FxBarrierOption, FxDoubleBarrierOption,
    FxVanillaOption, Instrument, OptionType, PlainVanillaPayoff,
};
use pricer_models::process::GarmanKohlhagenProcess;
use serde::{Deserialize, Serialize};

/// Premium and sensitivities in contract units.
///
/// - `premium`: NPV × notional / spot
/// - `delta`: Δ × notional
/// - `gamma`: Γ × notional × spot / 100
/// - `vega`: ν × notional / (100 × spot)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PricingResult {
    /// Scaled premium.
    pub premium: f64,
    /// Scaled delta.
    pub delta: f64,
    /// Scaled gamma.
    pub gamma: f64,
    /// Scaled vega.
    pub vega: f64,
}

/// Per-unit engine output before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct UnitResults {
    npv: f64,
    delta: f64,
    gamma: f64,
    vega: f64,
}

/// Market conventions and engine settings shared by every contract.
///
/// # Examples
/// ```
/// use adapter_contract::{ContractBuilder, RawContractRequest, ReferenceRates};
/// use pricer_core::types::Date;
/// use pricer_pricing::PricingDispatcher;
///
/// let request = RawContractRequest::from_pairs([
///     ("CURRENCY_PAIR", "EURUSD"),
///     ("MATURITY", "6M"),
///     ("STRIKE", "1.10"),
///     ("NOTIONAL", "1000000"),
///     ("EXOTIC_TYPE", "VANILLA"),
///     ("EXERCISE", "E"),
///     ("TYPE", "CALL"),
///     ("SPOT", "1.08"),
///     ("VOLATILITY", "0.08"),
/// ]);
/// let today = Date::from_ymd(2024, 1, 15).unwrap();
/// let rates = ReferenceRates::default();
/// let spec = ContractBuilder::new(today, &rates).build(&request).unwrap();
///
/// let result = PricingDispatcher::default().price(&spec).unwrap();
/// assert!(result.premium > 0.0);
/// assert!(result.delta > 0.0 && result.delta < 1_000_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingDispatcher {
    calendar: Calendar,
    rate_day_count: DayCountConvention,
    vol_day_count: DayCountConvention,
    binomial_steps: usize,
}

impl Default for PricingDispatcher {
    fn default() -> Self {
        Self {
            calendar: Calendar::UnitedStatesGovernmentBond,
            rate_day_count: DayCountConvention::Actual360,
            vol_day_count: DayCountConvention::ActualActualIsda,
            binomial_steps: DEFAULT_STEPS,
        }
    }
}

impl PricingDispatcher {
    /// Overrides the lattice size used for American vanillas.
    pub fn with_binomial_steps(mut self, steps: usize) -> Self {
        self.binomial_steps = steps;
        self
    }

    /// Lattice size used for American vanillas.
    pub fn binomial_steps(&self) -> usize {
        self.binomial_steps
    }

    /// Validates `request` and prices the resulting contract.
    pub fn price_request(
        &self,
        request: &RawContractRequest,
        today: Date,
        rates: &ReferenceRates,
    ) -> Result<PricingResult, ContractError> {
        let spec = ContractBuilder::new(today, rates).build(request)?;
        self.price(&spec)
    }

    /// Prices a normalized contract.
    ///
    /// Greeks are reported for vanillas only; barrier products carry the
    /// scaled premium with zero Greeks.
    ///
    /// # Errors
    ///
    /// `ContractError::Pricing` carrying the pricing library's message.
    pub fn price(&self, spec: &NormalizedContractSpec) -> Result<PricingResult, ContractError> {
        let exotic = spec.exotic_type().code();
        tracing::info!(
            foreign = %spec.pair().foreign,
            domestic = %spec.pair().domestic,
            exotic,
            side = %spec.option_side(),
            exercise = %spec.exercise_style(),
            strike = spec.strike(),
            notional = spec.notional(),
            expiry = %spec.dates().expiry,
            "Pricing contract"
        );

        let reference = self.reference_date(spec.dates().evaluation)?;
        if spec.dates().expiry <= reference {
            let message = format!(
                "MATURITY must fall after {}, the first business day on or after today.",
                reference
            );
            tracing::warn!(expiry = %spec.dates().expiry, %reference, "Maturity before curve start");
            return Err(ContractError::Validation(vec![message]));
        }

        match self.unit_results(spec, reference) {
            Ok(unit) => {
                metrics::counter!("pricer_contracts_priced_total", "exotic" => exotic).increment(1);
                Ok(scale(&unit, spec.notional(), spec.spot()))
            }
            Err(err) => {
                metrics::counter!("pricer_contracts_failed_total", "exotic" => exotic)
                    .increment(1);
                tracing::warn!(exotic, error = %err, "Pricing failed");
                Err(ContractError::Pricing(err.to_string()))
            }
        }
    }

    /// Curve reference date: the evaluation date rolled to a business day.
    fn reference_date(&self, evaluation: Date) -> Result<Date, ContractError> {
        self.calendar
            .adjust(evaluation, BusinessDayConvention::Following)
            .map_err(|e| ContractError::Pricing(e.to_string()))
    }

    fn process(
        &self,
        spec: &NormalizedContractSpec,
        reference: Date,
    ) -> Result<GarmanKohlhagenProcess, EngineError> {
        let pair = spec.pair();
        let foreign = FlatForward::new(reference, pair.foreign_rate, self.rate_day_count)?;
        let domestic = FlatForward::new(reference, pair.domestic_rate, self.rate_day_count)?;
        let vol = BlackConstantVol::new(reference, spec.volatility(), self.vol_day_count)?;
        Ok(GarmanKohlhagenProcess::new(spec.spot(), foreign, domestic, vol)?)
    }

    fn unit_results(
        &self,
        spec: &NormalizedContractSpec,
        reference: Date,
    ) -> Result<UnitResults, EngineError> {
        let process = self.process(spec, reference)?;
        let side = match spec.option_side() {
            OptionSide::Call => OptionType::Call,
            OptionSide::Put => OptionType::Put,
        };
        let payoff = PlainVanillaPayoff::new(side, spec.strike())?;
        let dates = spec.dates();
        let exercise = match spec.exercise_style() {
            ExerciseStyle::European => Exercise::european(dates.expiry),
            ExerciseStyle::American => Exercise::american(dates.evaluation, dates.expiry),
        };

        match (spec.exotic_type(), spec.barrier()) {
            (ExoticType::Vanilla, _) => {
                let mut option = FxVanillaOption::new(payoff, exercise);
                option.set_pricing_engine(match spec.exercise_style() {
                    ExerciseStyle::European => PricingEngine::analytic_european(process),
                    ExerciseStyle::American => {
                        PricingEngine::binomial_american(process, self.binomial_steps)
                    }
                });
                Ok(UnitResults {
                    npv: option.npv()?,
                    delta: option.delta()?,
                    gamma: option.gamma()?,
                    vega: option.vega()?,
                })
            }
            (ExoticType::KnockOutBarrier | ExoticType::KnockInBarrier, Some(barrier)) => {
                let (kind, level) = match (barrier.direction, barrier.single_level()) {
                    (Some(direction), Some(level)) => (barrier_type(direction), level),
                    _ => return Err(missing_barrier()),
                };
                let mut option =
                    FxBarrierOption::new(kind, level, spec.rebate(), payoff, exercise);
                option.set_pricing_engine(PricingEngine::analytic_barrier(process));
                Ok(UnitResults {
                    npv: option.npv()?,
                    ..UnitResults::default()
                })
            }
            (exotic, Some(barrier)) if exotic.is_double_barrier() => {
                let (Some(lower), Some(upper)) = (barrier.lower, barrier.upper) else {
                    return Err(missing_barrier());
                };
                let mut option = FxDoubleBarrierOption::new(
                    double_barrier_type(exotic),
                    lower,
                    upper,
                    spec.rebate(),
                    payoff,
                    exercise,
                );
                option.set_pricing_engine(PricingEngine::analytic_double_barrier(process));
                Ok(UnitResults {
                    npv: option.npv()?,
                    ..UnitResults::default()
                })
            }
            _ => Err(missing_barrier()),
        }
    }
}

fn missing_barrier() -> EngineError {
    EngineError::Unsupported("barrier terms are missing".to_string())
}

fn barrier_type(direction: BarrierDirection) -> BarrierType {
    match direction {
        BarrierDirection::UpIn => BarrierType::UpIn,
        BarrierDirection::UpOut => BarrierType::UpOut,
        BarrierDirection::DownIn => BarrierType::DownIn,
        BarrierDirection::DownOut => BarrierType::DownOut,
    }
}

fn double_barrier_type(exotic: ExoticType) -> DoubleBarrierType {
    match exotic {
        ExoticType::KnockInDoubleBarrier => DoubleBarrierType::KnockIn,
        ExoticType::Kiko => DoubleBarrierType::Kiko,
        ExoticType::Koki => DoubleBarrierType::Koki,
        _ => DoubleBarrierType::KnockOut,
    }
}

fn scale(unit: &UnitResults, notional: f64, spot: f64) -> PricingResult {
    PricingResult {
        premium: unit.npv * notional / spot,
        delta: unit.delta * notional,
        gamma: unit.gamma * notional * spot / 100.0,
        vega: unit.vega * notional / (100.0 * spot),
    }
}
