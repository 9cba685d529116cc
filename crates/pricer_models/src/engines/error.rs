//! Engine error types.

use pricer_core::market_data::MarketDataError;
use thiserror::Error;

use crate::analytical::AnalyticalError;

/// Errors raised while valuing an instrument.
///
/// # Examples
/// ```
/// use pricer_models::engines::EngineError;
///
/// let err = EngineError::ResultNotProvided("vega");
/// assert_eq!(err.to_string(), "vega not provided");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    /// No engine attached to the instrument.
    #[error("null pricing engine")]
    NoEngine,

    /// The engine cannot value this instrument or exercise.
    #[error("{0}")]
    Unsupported(String),

    /// Formula rejected its inputs.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// Market data lookup failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// The engine does not compute the requested result.
    #[error("{0} not provided")]
    ResultNotProvided(&'static str),
}
