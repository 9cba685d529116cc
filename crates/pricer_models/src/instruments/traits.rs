//! Instrument trait definitions.
//!
//! An instrument holds its terms and an attached engine. Results are
//! computed lazily on first access and cached until the engine changes.

use crate::engines::EngineError;

/// Values produced by an engine for one option.
///
/// Greeks are `None` when the engine does not compute them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OptionResults {
    /// Net present value in domestic currency per unit of foreign notional.
    pub value: f64,
    /// ∂V/∂S.
    pub delta: Option<f64>,
    /// ∂²V/∂S².
    pub gamma: Option<f64>,
    /// ∂V/∂σ per unit of volatility.
    pub vega: Option<f64>,
}

impl OptionResults {
    /// Results carrying only a value.
    pub fn value_only(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }
}

/// Common interface of priceable options.
///
/// # Required Methods
///
/// - [`calculate`](Instrument::calculate) - run (or reuse) the attached engine
///
/// # Provided Methods
///
/// - [`npv`](Instrument::npv), [`delta`](Instrument::delta),
///   [`gamma`](Instrument::gamma), [`vega`](Instrument::vega)
pub trait Instrument {
    /// Runs the attached engine, reusing cached results.
    ///
    /// # Errors
    ///
    /// `EngineError::NoEngine` without an engine, otherwise whatever the
    /// engine reports.
    fn calculate(&self) -> Result<OptionResults, EngineError>;

    /// Net present value.
    fn npv(&self) -> Result<f64, EngineError> {
        Ok(self.calculate()?.value)
    }

    /// Spot delta.
    fn delta(&self) -> Result<f64, EngineError> {
        self.calculate()?
            .delta
            .ok_or(EngineError::ResultNotProvided("delta"))
    }

    /// Spot gamma.
    fn gamma(&self) -> Result<f64, EngineError> {
        self.calculate()?
            .gamma
            .ok_or(EngineError::ResultNotProvided("gamma"))
    }

    /// Vega per unit of volatility.
    fn vega(&self) -> Result<f64, EngineError> {
        self.calculate()?
            .vega
            .ok_or(EngineError::ResultNotProvided("vega"))
    }
}
