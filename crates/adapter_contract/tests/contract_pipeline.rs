//! Integration tests for the contract pipeline.
//!
//! Requests enter as JSON bodies, exactly as the HTTP layer receives them,
//! and leave as a normalized contract or the client-facing error list.

use adapter_contract::{
    BarrierDirection, ContractBuilder, ContractError, ExerciseStyle, ExoticType,
    NormalizedContractSpec, OptionSide, RawContractRequest, ReferenceRates,
};
use pricer_core::types::{Currency, Date};

fn today() -> Date {
    Date::from_ymd(2024, 1, 15).unwrap()
}

fn build(json: &str) -> Result<NormalizedContractSpec, ContractError> {
    let request: RawContractRequest = serde_json::from_str(json).unwrap();
    let rates = ReferenceRates::default();
    ContractBuilder::new(today(), &rates).build(&request)
}

// =============================================================================
// Accepted contracts
// =============================================================================

#[test]
fn test_vanilla_usdeur_with_numeric_json_fields() {
    let spec = build(
        r#"{
            "CURRENCY_PAIR": "USDEUR", "MATURITY": "1Y", "STRIKE": 100,
            "NOTIONAL": 1000000, "EXOTIC_TYPE": "VANILLA", "EXERCISE": "E",
            "TYPE": "CALL", "SPOT": 100, "VOLATILITY": 0.2
        }"#,
    )
    .unwrap();

    assert_eq!(spec.pair().foreign, Currency::USD);
    assert_eq!(spec.pair().domestic, Currency::EUR);
    assert_eq!(spec.dates().evaluation, today());
    assert_eq!(spec.dates().expiry, Date::from_ymd(2025, 1, 15).unwrap());
    assert_eq!(spec.exercise_style(), ExerciseStyle::European);
    assert_eq!(spec.option_side(), OptionSide::Call);
    assert_eq!(spec.volatility(), 0.2);
}

#[test]
fn test_double_barrier_with_absolute_maturity() {
    let spec = build(
        r#"{
            "CURRENCY_PAIR": "gbpjpy", "MATURITY": "10Sep2024", "STRIKE": "190",
            "NOTIONAL": "500000", "EXOTIC_TYPE": "ko_db_barrier", "EXERCISE": "european",
            "TYPE": "put", "SPOT": "188.5", "VOLATILITY": "0.11",
            "UPPER_BARRIER": "200", "LOWER_BARRIER": "175"
        }"#,
    )
    .unwrap();

    assert_eq!(spec.exotic_type(), ExoticType::KnockOutDoubleBarrier);
    let barrier = spec.barrier().unwrap();
    assert_eq!(barrier.direction, None);
    assert_eq!(barrier.upper, Some(200.0));
    assert_eq!(barrier.lower, Some(175.0));
    assert_eq!(spec.dates().delivery, Date::from_ymd(2024, 9, 12).unwrap());
}

#[test]
fn test_barrier_fields_ignored_for_vanilla() {
    let spec = build(
        r#"{
            "CURRENCY_PAIR": "AUDNZD", "MATURITY": "2W", "STRIKE": "1.08",
            "NOTIONAL": "1e6", "EXOTIC_TYPE": "VANILLA", "EXERCISE": "A",
            "TYPE": "PUT", "SPOT": "1.07", "VOLATILITY": "0.07",
            "UPPER_BARRIER": "not a number", "LOWER_BARRIER": null
        }"#,
    )
    .unwrap();
    assert!(spec.barrier().is_none());
    assert_eq!(spec.exercise_style(), ExerciseStyle::American);
}

// =============================================================================
// Rejected contracts
// =============================================================================

#[test]
fn test_up_barrier_below_spot() {
    let err = build(
        r#"{
            "CURRENCY_PAIR": "EURUSD", "MATURITY": "3M", "STRIKE": "100",
            "NOTIONAL": "1000000", "EXOTIC_TYPE": "KO_BARRIER", "EXERCISE": "E",
            "TYPE": "CALL", "SPOT": "100", "VOLATILITY": "0.1", "UPPER_BARRIER": "90"
        }"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::Validation(vec!["UPPER_BARRIER must be > SPOT.".to_string()])
    );
}

#[test]
fn test_unsupported_currency() {
    let err = build(
        r#"{
            "CURRENCY_PAIR": "XXXYYY", "MATURITY": "3M", "STRIKE": "100",
            "NOTIONAL": "1000000", "EXOTIC_TYPE": "VANILLA", "EXERCISE": "E",
            "TYPE": "CALL", "SPOT": "100", "VOLATILITY": "0.1"
        }"#,
    )
    .unwrap_err();
    assert_eq!(
        err.messages(),
        vec!["Invalid CURRENCY_PAIR. Supported currencies are: USD, EUR, GBP, AUD, NZD, CAD, CHF, JPY."]
    );
}

#[test]
fn test_empty_request_reports_maturity_only() {
    let err = build("{}").unwrap_err();
    assert_eq!(err.messages(), vec!["MATURITY is empty"]);
}

#[test]
fn test_every_field_empty_after_valid_maturity() {
    let err = build(r#"{"MATURITY": "1M"}"#).unwrap_err();
    assert_eq!(
        err.messages(),
        vec![
            "CURRENCY_PAIR is empty",
            "STRIKE is empty",
            "NOTIONAL is empty",
            "SPOT is empty",
            "VOLATILITY is empty",
            "TYPE is empty",
            "EXERCISE is empty",
            "EXOTIC_TYPE is empty",
        ]
    );
}

#[test]
fn test_knock_in_put_direction() {
    let spec = build(
        r#"{
            "CURRENCY_PAIR": "USDCHF", "MATURITY": "6M", "STRIKE": "0.9",
            "NOTIONAL": "250000", "EXOTIC_TYPE": "KI_BARRIER", "EXERCISE": "E",
            "TYPE": "PUT", "SPOT": "0.88", "VOLATILITY": "0.09", "LOWER_BARRIER": "0.85"
        }"#,
    )
    .unwrap();
    assert_eq!(
        spec.barrier().unwrap().direction,
        Some(BarrierDirection::DownIn)
    );
}
