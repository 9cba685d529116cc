//! Direct European vanilla pricing.
//!
//! Prices a plain European option from explicit market inputs rather than
//! a contract field map: caller-supplied dates, rates, day count and
//! calendar, with one day count shared by both curves and the volatility.

use pricer_core::market_data::{BlackConstantVol, FlatForward, MarketDataError};
use pricer_core::types::{BusinessDayConvention, Calendar, Date, DateError, DayCountConvention};
use pricer_models::analytical::AnalyticalError;
use pricer_models::engines::{EngineError, PricingEngine};
use pricer_models::instruments::{
    Exercise, FxVanillaOption, Instrument, OptionType, PlainVanillaPayoff,
};
use pricer_models::process::GarmanKohlhagenProcess;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Market inputs for a single European vanilla.
///
/// Dates are `MM/DD/YYYY`. `option_type` is `call` (any case) for a call;
/// anything else prices a put.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VanillaOptionRequest {
    /// Expiry date.
    pub maturity_date: String,
    /// Evaluation date.
    pub calculation_date: String,
    /// Spot quote.
    pub spot: f64,
    /// Strike.
    pub strike: f64,
    /// Flat volatility.
    pub volatility: f64,
    /// Continuous dividend (foreign) rate.
    pub dividend_rate: f64,
    /// Continuous risk-free (domestic) rate.
    pub risk_free_rate: f64,
    /// `call` or `put`.
    pub option_type: String,
    /// Day count name, e.g. `Actual365Fixed` or `ACT/360`.
    pub day_count: String,
    /// Calendar name, e.g. `UnitedStatesGovernmentBond` or `TARGET`.
    pub calendar: String,
}

/// Unscaled NPV of a vanilla.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanillaOptionPrice {
    /// Net present value per unit.
    pub option_price: f64,
}

/// Failures of [`price_vanilla`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VanillaPricingError {
    /// A date field is not `MM/DD/YYYY`.
    #[error("Invalid {field}: {source}")]
    Date {
        /// Offending request field.
        field: &'static str,
        /// Parse failure.
        source: DateError,
    },

    /// Unknown day count or calendar name.
    #[error("{0}")]
    Convention(String),

    /// Invalid curve or volatility input.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Invalid payoff input.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// Engine failure.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn parse_date(field: &'static str, raw: &str) -> Result<Date, VanillaPricingError> {
    Date::parse_mmddyyyy(raw.trim()).map_err(|source| VanillaPricingError::Date { field, source })
}

/// Prices a European vanilla with the analytic engine.
///
/// Curves are anchored at the calculation date moved to the next business
/// day of `calendar`.
///
/// # Examples
/// ```
/// use pricer_pricing::vanilla::{price_vanilla, VanillaOptionRequest};
///
/// let request = VanillaOptionRequest {
///     maturity_date: "01/02/2025".to_string(),
///     calculation_date: "01/02/2024".to_string(),
///     spot: 100.0,
///     strike: 100.0,
///     volatility: 0.2,
///     dividend_rate: 0.01,
///     risk_free_rate: 0.05,
///     option_type: "Call".to_string(),
///     day_count: "Actual365Fixed".to_string(),
///     calendar: "UnitedStatesGovernmentBond".to_string(),
/// };
/// let price = price_vanilla(&request).unwrap();
/// assert!((price.option_price - 9.841992808060539).abs() < 1e-9);
/// ```
pub fn price_vanilla(
    request: &VanillaOptionRequest,
) -> Result<VanillaOptionPrice, VanillaPricingError> {
    let maturity = parse_date("maturityDate", &request.maturity_date)?;
    let calculation = parse_date("calculationDate", &request.calculation_date)?;
    let day_count: DayCountConvention = request
        .day_count
        .parse()
        .map_err(VanillaPricingError::Convention)?;
    let calendar: Calendar = request
        .calendar
        .parse()
        .map_err(VanillaPricingError::Convention)?;
    let option_type = if request.option_type.trim().eq_ignore_ascii_case("call") {
        OptionType::Call
    } else {
        OptionType::Put
    };

    tracing::info!(
        %maturity,
        %calculation,
        spot = request.spot,
        strike = request.strike,
        ?option_type,
        day_count = %day_count,
        calendar = calendar.name(),
        "Pricing vanilla option"
    );

    let reference = calendar
        .adjust(calculation, BusinessDayConvention::Following)
        .map_err(|source| VanillaPricingError::Date {
            field: "calculationDate",
            source,
        })?;
    let dividend = FlatForward::new(reference, request.dividend_rate, day_count)?;
    let risk_free = FlatForward::new(reference, request.risk_free_rate, day_count)?;
    let vol = BlackConstantVol::new(reference, request.volatility, day_count)?;
    let process = GarmanKohlhagenProcess::new(request.spot, dividend, risk_free, vol)?;

    let payoff = PlainVanillaPayoff::new(option_type, request.strike)?;
    let mut option = FxVanillaOption::new(payoff, Exercise::european(maturity));
    option.set_pricing_engine(PricingEngine::analytic_european(process));

    Ok(VanillaOptionPrice {
        option_price: option.npv()?,
    })
}
