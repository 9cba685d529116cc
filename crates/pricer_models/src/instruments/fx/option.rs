//! FX option instruments.
//!
//! Each option stores its terms, an optional [`PricingEngine`] and a
//! result cache. Attaching a new engine clears the cache.
//!
//! # Examples
//!
//! ```
//! use pricer_core::market_data::{BlackConstantVol, FlatForward};
//! use pricer_core::types::{Date, DayCountConvention};
//! use pricer_models::engines::PricingEngine;
//! use pricer_models::instruments::{BarrierType, Exercise, FxBarrierOption, Instrument, OptionType, PlainVanillaPayoff};
//! use pricer_models::process::GarmanKohlhagenProcess;
//!
//! let today = Date::from_ymd(2024, 1, 2).unwrap();
//! let foreign = FlatForward::new(today, 0.01, DayCountConvention::Actual360).unwrap();
//! let domestic = FlatForward::new(today, 0.05, DayCountConvention::Actual360).unwrap();
//! let vol = BlackConstantVol::new(today, 0.2, DayCountConvention::ActualActualIsda).unwrap();
//! let process = GarmanKohlhagenProcess::new(100.0, foreign, domestic, vol).unwrap();
//!
//! let payoff = PlainVanillaPayoff::new(OptionType::Call, 100.0).unwrap();
//! let exercise = Exercise::european(Date::from_ymd(2025, 1, 2).unwrap());
//! let mut option = FxBarrierOption::new(BarrierType::UpOut, 120.0, 0.0, payoff, exercise);
//! option.set_pricing_engine(PricingEngine::analytic_barrier(process));
//!
//! assert!(option.npv().unwrap() > 0.0);
//! assert!(option.delta().is_err());
//! ```

use std::cell::OnceCell;

use crate::engines::{EngineError, PricingEngine};
use crate::instruments::barrier::{BarrierType, DoubleBarrierType};
use crate::instruments::exercise::Exercise;
use crate::instruments::payoff::PlainVanillaPayoff;
use crate::instruments::traits::{Instrument, OptionResults};

type ResultCache = OnceCell<Result<OptionResults, EngineError>>;

/// Plain vanilla FX option.
#[derive(Debug, Clone)]
pub struct FxVanillaOption {
    payoff: PlainVanillaPayoff,
    exercise: Exercise,
    engine: Option<PricingEngine>,
    results: ResultCache,
}

impl FxVanillaOption {
    /// Creates an option without an engine.
    pub fn new(payoff: PlainVanillaPayoff, exercise: Exercise) -> Self {
        Self {
            payoff,
            exercise,
            engine: None,
            results: OnceCell::new(),
        }
    }

    /// Payoff.
    #[inline]
    pub fn payoff(&self) -> &PlainVanillaPayoff {
        &self.payoff
    }

    /// Exercise.
    #[inline]
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    /// Attaches `engine` and discards cached results.
    pub fn set_pricing_engine(&mut self, engine: PricingEngine) {
        self.engine = Some(engine);
        self.results = OnceCell::new();
    }
}

impl Instrument for FxVanillaOption {
    fn calculate(&self) -> Result<OptionResults, EngineError> {
        self.results
            .get_or_init(|| {
                let engine = self.engine.as_ref().ok_or(EngineError::NoEngine)?;
                engine.calculate_vanilla(self)
            })
            .clone()
    }
}

/// Single barrier FX option.
#[derive(Debug, Clone)]
pub struct FxBarrierOption {
    barrier_type: BarrierType,
    barrier: f64,
    rebate: f64,
    payoff: PlainVanillaPayoff,
    exercise: Exercise,
    engine: Option<PricingEngine>,
    results: ResultCache,
}

impl FxBarrierOption {
    /// Creates an option without an engine.
    pub fn new(
        barrier_type: BarrierType,
        barrier: f64,
        rebate: f64,
        payoff: PlainVanillaPayoff,
        exercise: Exercise,
    ) -> Self {
        Self {
            barrier_type,
            barrier,
            rebate,
            payoff,
            exercise,
            engine: None,
            results: OnceCell::new(),
        }
    }

    /// Barrier type.
    #[inline]
    pub fn barrier_type(&self) -> BarrierType {
        self.barrier_type
    }

    /// Barrier level.
    #[inline]
    pub fn barrier(&self) -> f64 {
        self.barrier
    }

    /// Rebate.
    #[inline]
    pub fn rebate(&self) -> f64 {
        self.rebate
    }

    /// Payoff.
    #[inline]
    pub fn payoff(&self) -> &PlainVanillaPayoff {
        &self.payoff
    }

    /// Exercise.
    #[inline]
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    /// Attaches `engine` and discards cached results.
    pub fn set_pricing_engine(&mut self, engine: PricingEngine) {
        self.engine = Some(engine);
        self.results = OnceCell::new();
    }
}

impl Instrument for FxBarrierOption {
    fn calculate(&self) -> Result<OptionResults, EngineError> {
        self.results
            .get_or_init(|| {
                let engine = self.engine.as_ref().ok_or(EngineError::NoEngine)?;
                engine.calculate_barrier(self)
            })
            .clone()
    }
}

/// Double barrier FX option.
#[derive(Debug, Clone)]
pub struct FxDoubleBarrierOption {
    barrier_type: DoubleBarrierType,
    lower: f64,
    upper: f64,
    rebate: f64,
    payoff: PlainVanillaPayoff,
    exercise: Exercise,
    engine: Option<PricingEngine>,
    results: ResultCache,
}

impl FxDoubleBarrierOption {
    /// Creates an option without an engine.
    pub fn new(
        barrier_type: DoubleBarrierType,
        lower: f64,
        upper: f64,
        rebate: f64,
        payoff: PlainVanillaPayoff,
        exercise: Exercise,
    ) -> Self {
        Self {
            barrier_type,
            lower,
            upper,
            rebate,
            payoff,
            exercise,
            engine: None,
            results: OnceCell::new(),
        }
    }

    /// Barrier type.
    #[inline]
    pub fn barrier_type(&self) -> DoubleBarrierType {
        self.barrier_type
    }

    /// Lower barrier level.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper barrier level.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Rebate.
    #[inline]
    pub fn rebate(&self) -> f64 {
        self.rebate
    }

    /// Payoff.
    #[inline]
    pub fn payoff(&self) -> &PlainVanillaPayoff {
        &self.payoff
    }

    /// Exercise.
    #[inline]
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    /// Attaches `engine` and discards cached results.
    pub fn set_pricing_engine(&mut self, engine: PricingEngine) {
        self.engine = Some(engine);
        self.results = OnceCell::new();
    }
}

impl Instrument for FxDoubleBarrierOption {
    fn calculate(&self) -> Result<OptionResults, EngineError> {
        self.results
            .get_or_init(|| {
                let engine = self.engine.as_ref().ok_or(EngineError::NoEngine)?;
                engine.calculate_double_barrier(self)
            })
            .clone()
    }
}
