//! Integration tests for module exports.
//!
//! Verify that public modules and types are reachable via absolute paths
//! and compose the way downstream crates use them.

/// Types module paths.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::calendar::Calendar;
    use pricer_core::types::currency::Currency;
    use pricer_core::types::currency_pair::CurrencyPair;
    use pricer_core::types::time::{BusinessDayConvention, Date, Tenor};

    let today = Date::from_ymd(2023, 9, 8).unwrap();
    let expiry = today.advance("1W".parse::<Tenor>().unwrap()).unwrap();
    assert_eq!(expiry, Date::from_ymd(2023, 9, 15).unwrap());

    let pair: CurrencyPair = "AUDNZD".parse().unwrap();
    assert_eq!(pair.foreign(), Currency::AUD);

    let adjusted = Calendar::UnitedStatesGovernmentBond
        .adjust(
            Date::from_ymd(2023, 9, 4).unwrap(),
            BusinessDayConvention::Following,
        )
        .unwrap();
    // Labor Day 2023
    assert_eq!(adjusted, Date::from_ymd(2023, 9, 5).unwrap());
}

/// Market data paths and the two-day-count setup used by FX pricing.
#[test]
fn test_market_data_module_exports() {
    use pricer_core::market_data::{
        BlackConstantVol, BlackVolTermStructure, FlatForward, YieldTermStructure,
    };
    use pricer_core::types::{Date, DayCountConvention};

    let reference = Date::from_ymd(2024, 1, 2).unwrap();
    let expiry = Date::from_ymd(2024, 7, 2).unwrap();

    let domestic = FlatForward::new(reference, 0.05, DayCountConvention::Actual360).unwrap();
    let vol = BlackConstantVol::new(reference, 0.1, DayCountConvention::ActualActualIsda).unwrap();

    let t_rate = domestic.time_from_reference(expiry);
    let t_vol = vol.time_from_reference(expiry);
    assert!((t_rate - 182.0 / 360.0).abs() < 1e-14);
    assert!((t_vol - 182.0 / 366.0).abs() < 1e-14);
    assert!(t_rate > t_vol);
}

/// Error types are std errors.
#[test]
fn test_error_exports() {
    use pricer_core::market_data::MarketDataError;
    use pricer_core::types::{CurrencyError, DateError};

    fn assert_error<E: std::error::Error>() {}
    assert_error::<DateError>();
    assert_error::<CurrencyError>();
    assert_error::<MarketDataError>();
}
