//! Progressive narrowing of a raw request into a contract specification.
//!
//! [`ContractDraft`] starts with every term unset. [`ContractBuilder::draft`]
//! runs the validators and resolvers in a fixed order, recording each value
//! or error, and [`ContractDraft::build`] either yields a
//! [`NormalizedContractSpec`] or the collected errors.

use pricer_core::types::Date;

use crate::barrier::BarrierClassifier;
use crate::currency::{CurrencyPairResolver, ReferenceRates};
use crate::error::ContractError;
use crate::fields::FieldValidator;
use crate::maturity::MaturityResolver;
use crate::request::{
    RawContractRequest, CURRENCY_PAIR, EXERCISE, EXOTIC_TYPE, MATURITY, NOTIONAL, SPOT, STRIKE,
    TYPE, VOLATILITY,
};
use crate::spec::{
    BarrierSpec, ExerciseStyle, ExoticType, NormalizedContractSpec, OptionSide, PositiveFloat,
    ResolvedDates, ResolvedPair,
};

/// Contract terms collected so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractDraft {
    /// Resolved dates.
    pub dates: Option<ResolvedDates>,
    /// Resolved currency legs.
    pub pair: Option<ResolvedPair>,
    /// Strike.
    pub strike: Option<PositiveFloat>,
    /// Notional.
    pub notional: Option<PositiveFloat>,
    /// Spot.
    pub spot: Option<PositiveFloat>,
    /// Volatility.
    pub volatility: Option<PositiveFloat>,
    /// Call or put.
    pub option_side: Option<OptionSide>,
    /// Exercise style.
    pub exercise_style: Option<ExerciseStyle>,
    /// Product family.
    pub exotic_type: Option<ExoticType>,
    /// Barrier terms (`None` inside for vanilla).
    pub barrier: Option<Option<BarrierSpec>>,
    errors: Vec<String>,
    failure: Option<ContractError>,
}

/// Validates raw requests against a fixed evaluation date and rate table.
///
/// # Examples
/// ```
/// use adapter_contract::{ContractBuilder, ExoticType, RawContractRequest, ReferenceRates};
/// use pricer_core::types::Date;
///
/// let request = RawContractRequest::from_pairs([
///     ("CURRENCY_PAIR", "EURUSD"),
///     ("MATURITY", "3M"),
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
/// assert_eq!(spec.exotic_type(), ExoticType::Vanilla);
/// assert_eq!(spec.dates().expiry, Date::from_ymd(2024, 4, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContractBuilder<'a> {
    today: Date,
    rates: &'a ReferenceRates,
}

impl<'a> ContractBuilder<'a> {
    /// Creates a builder for contracts evaluated on `today`.
    pub fn new(today: Date, rates: &'a ReferenceRates) -> Self {
        Self { today, rates }
    }

    /// Validates every field of `request` into a draft.
    ///
    /// A maturity failure stops immediately. Otherwise currency, strike,
    /// notional, spot, volatility, side, exercise and exotic errors are
    /// accumulated in that order, followed by barrier errors when spot,
    /// side and exotic type are all valid.
    pub fn draft(&self, request: &RawContractRequest) -> ContractDraft {
        let mut draft = ContractDraft::default();

        match MaturityResolver::new(self.today).resolve(request.get(MATURITY)) {
            Ok(dates) => draft.dates = Some(dates),
            Err(message) => {
                draft.errors.push(message);
                return draft;
            }
        }

        match CurrencyPairResolver::new(self.rates).resolve(request.get(CURRENCY_PAIR)) {
            Ok(pair) => draft.pair = Some(pair),
            Err(ContractError::Validation(messages)) => draft.errors.extend(messages),
            Err(other) => draft.failure = Some(other),
        }

        draft.strike = draft.record(FieldValidator::positive_float(STRIKE, request.get(STRIKE)));
        draft.notional =
            draft.record(FieldValidator::positive_float(NOTIONAL, request.get(NOTIONAL)));
        draft.spot = draft.record(FieldValidator::positive_float(SPOT, request.get(SPOT)));
        draft.volatility =
            draft.record(FieldValidator::positive_float(VOLATILITY, request.get(VOLATILITY)));
        draft.option_side = draft.record(FieldValidator::option_side(TYPE, request.get(TYPE)));
        draft.exercise_style =
            draft.record(FieldValidator::exercise_style(EXERCISE, request.get(EXERCISE)));

        match FieldValidator::exotic_type(EXOTIC_TYPE, request.get(EXOTIC_TYPE)) {
            Ok(exotic) => draft.exotic_type = Some(exotic),
            Err(message) => {
                // An unknown product literal cannot form an instrument at all.
                if draft.failure.is_none() && !request.get(EXOTIC_TYPE).trim().is_empty() {
                    draft.failure = Some(ContractError::Construction(message.clone()));
                }
                draft.errors.push(message);
            }
        }

        if let (Some(spot), Some(side), Some(exotic)) =
            (draft.spot, draft.option_side, draft.exotic_type)
        {
            match BarrierClassifier::classify(side, exotic, spot.get(), request) {
                Ok(barrier) => draft.barrier = Some(barrier),
                Err(messages) => draft.errors.extend(messages),
            }
        }

        draft
    }

    /// Validates and normalizes `request` in one step.
    pub fn build(
        &self,
        request: &RawContractRequest,
    ) -> Result<NormalizedContractSpec, ContractError> {
        let result = self.draft(request).build();
        match &result {
            Ok(spec) => tracing::debug!(
                foreign = %spec.pair().foreign,
                domestic = %spec.pair().domestic,
                exotic = spec.exotic_type().code(),
                "Contract normalized"
            ),
            Err(err) => {
                tracing::warn!(kind = err.kind(), errors = ?err.messages(), "Contract rejected")
            }
        }
        result
    }
}

impl ContractDraft {
    fn record<T>(&mut self, result: Result<T, String>) -> Option<T> {
        result.map_err(|message| self.errors.push(message)).ok()
    }

    /// Validation messages collected so far.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Narrows the draft into a specification.
    ///
    /// # Errors
    ///
    /// - `Configuration` when a reference rate is missing
    /// - `Validation` with every collected message when any field failed
    /// - `Construction` when the only failure is an unknown exotic type
    pub fn build(self) -> Result<NormalizedContractSpec, ContractError> {
        if let Some(ContractError::Configuration(message)) = &self.failure {
            return Err(ContractError::Configuration(message.clone()));
        }
        if self.errors.len() == 1 {
            if let Some(failure @ ContractError::Construction(_)) = self.failure {
                return Err(failure);
            }
        }
        if !self.errors.is_empty() {
            return Err(ContractError::Validation(self.errors));
        }

        let incomplete = || ContractError::Construction("contract draft is incomplete".to_string());
        Ok(NormalizedContractSpec {
            pair: self.pair.ok_or_else(incomplete)?,
            dates: self.dates.ok_or_else(incomplete)?,
            strike: self.strike.ok_or_else(incomplete)?,
            notional: self.notional.ok_or_else(incomplete)?,
            spot: self.spot.ok_or_else(incomplete)?,
            volatility: self.volatility.ok_or_else(incomplete)?,
            exercise_style: self.exercise_style.ok_or_else(incomplete)?,
            option_side: self.option_side.ok_or_else(incomplete)?,
            exotic_type: self.exotic_type.ok_or_else(incomplete)?,
            barrier: self.barrier.ok_or_else(incomplete)?,
        })
    }
}
