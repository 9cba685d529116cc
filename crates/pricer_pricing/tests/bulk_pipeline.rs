//! End-to-end batch pricing over the full contract pipeline.
//!
//! Mixed products, a rejected item and an engine-level failure run through
//! one batch on a multi-threaded runtime.

use adapter_contract::{RawContractRequest, ReferenceRates};
use pricer_core::types::{Currency, Date};
use pricer_pricing::{BatchItemResult, BulkDispatcher, BulkSettings, PricingDispatcher};

fn today() -> Date {
    Date::from_ymd(2024, 3, 15).unwrap()
}

fn request(json: &str) -> RawContractRequest {
    serde_json::from_str(json).unwrap()
}

fn batch() -> Vec<RawContractRequest> {
    vec![
        request(
            r#"{"CURRENCY_PAIR": "USDEUR", "MATURITY": "1Y", "STRIKE": 100, "NOTIONAL": 1000000,
                "EXOTIC_TYPE": "VANILLA", "EXERCISE": "E", "TYPE": "CALL", "SPOT": 100,
                "VOLATILITY": 0.2}"#,
        ),
        request(
            r#"{"CURRENCY_PAIR": "EURUSD", "MATURITY": "3M", "STRIKE": 100, "NOTIONAL": 1000000,
                "EXOTIC_TYPE": "KO_BARRIER", "EXERCISE": "E", "TYPE": "CALL", "SPOT": 100,
                "VOLATILITY": 0.1, "UPPER_BARRIER": 90}"#,
        ),
        request(
            r#"{"CURRENCY_PAIR": "GBPJPY", "MATURITY": "6M", "STRIKE": 190, "NOTIONAL": 500000,
                "EXOTIC_TYPE": "KI_DB_BARRIER", "EXERCISE": "E", "TYPE": "PUT", "SPOT": 188,
                "VOLATILITY": 0.11, "UPPER_BARRIER": 205, "LOWER_BARRIER": 170}"#,
        ),
        request(
            r#"{"CURRENCY_PAIR": "AUDNZD", "MATURITY": "2W", "STRIKE": 1.08, "NOTIONAL": 250000,
                "EXOTIC_TYPE": "KOKI", "EXERCISE": "E", "TYPE": "CALL", "SPOT": 1.07,
                "VOLATILITY": 0.07, "UPPER_BARRIER": 1.12, "LOWER_BARRIER": 1.02}"#,
        ),
        request(
            r#"{"CURRENCY_PAIR": "USDJPY", "MATURITY": "1M", "STRIKE": 150, "NOTIONAL": 1000000,
                "EXOTIC_TYPE": "VANILLA", "EXERCISE": "A", "TYPE": "PUT", "SPOT": 149,
                "VOLATILITY": 0.09}"#,
        ),
    ]
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mixed_batch() {
    let bulk = BulkDispatcher::new(
        PricingDispatcher::default().with_binomial_steps(200),
        ReferenceRates::default(),
        BulkSettings::default(),
    );
    let results = bulk.dispatch(batch(), today()).await;

    assert_eq!(results.len(), 5);
    for (i, item) in results.iter().enumerate() {
        assert_eq!(item.index(), i);
    }

    let BatchItemResult::Ok { result, .. } = &results[0] else {
        panic!("vanilla failed: {:?}", results[0]);
    };
    assert!(result.premium >= 0.0);
    assert!(result.delta.abs() <= 1_000_000.0);
    assert!(result.gamma > 0.0 && result.vega > 0.0);

    assert_eq!(
        results[1],
        BatchItemResult::Error {
            index: 1,
            errors: vec!["UPPER_BARRIER must be > SPOT.".to_string()],
        }
    );

    let BatchItemResult::Ok { result, .. } = &results[2] else {
        panic!("double knock-in failed: {:?}", results[2]);
    };
    assert!(result.premium > 0.0);
    assert_eq!(result.delta, 0.0);

    assert_eq!(
        results[3],
        BatchItemResult::Error {
            index: 3,
            errors: vec![
                "analytic double barrier engine supports only knock-in and knock-out options"
                    .to_string()
            ],
        }
    );

    let BatchItemResult::Ok { result, .. } = &results[4] else {
        panic!("american put failed: {:?}", results[4]);
    };
    assert!(result.premium > 0.0);
    assert!(result.delta < 0.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_batch_is_deterministic() {
    let bulk = BulkDispatcher::new(
        PricingDispatcher::default().with_binomial_steps(100),
        ReferenceRates::default(),
        BulkSettings {
            max_concurrency: 2,
            ..BulkSettings::default()
        },
    );
    let first = bulk.dispatch(batch(), today()).await;
    let second = bulk.dispatch(batch(), today()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_reference_rate_is_reported_per_item() {
    let rates = ReferenceRates::from_rates([(Currency::USD, 0.05), (Currency::EUR, 0.01)]);
    let bulk = BulkDispatcher::new(PricingDispatcher::default(), rates, BulkSettings::default());
    let results = bulk.dispatch(batch(), today()).await;

    assert!(results[0].is_ok());
    assert_eq!(
        results[2],
        BatchItemResult::Error {
            index: 2,
            errors: vec!["No reference rate configured for GBP.".to_string()],
        }
    );
}
