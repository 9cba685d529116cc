//! Concurrent batch pricing.
//!
//! Every item of a batch is tagged with its input index and priced on the
//! blocking pool. A shared semaphore bounds how many items run at once and
//! each item has its own timeout. Failures, timeouts and panics become
//! per-item errors; the batch itself never fails and results come back in
//! input order.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use adapter_contract::{ContractError, RawContractRequest, ReferenceRates};
use futures::future::join_all;
use pricer_core::types::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::Instrument as _;
use uuid::Uuid;

use crate::dispatcher::{PricingDispatcher, PricingResult};

/// Default bound on items priced at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 64;

/// Default per-item timeout.
pub const DEFAULT_ITEM_TIMEOUT: Duration = Duration::from_secs(5);

/// Concurrency and timeout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkSettings {
    /// Maximum number of items priced at once.
    pub max_concurrency: usize,
    /// Time allowed for one item once it holds a permit.
    pub item_timeout: Duration,
}

impl Default for BulkSettings {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            item_timeout: DEFAULT_ITEM_TIMEOUT,
        }
    }
}

/// Failure of one batch item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchItemError {
    /// Validation, construction, configuration or pricing failure.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// The item did not finish within the timeout.
    #[error("Pricing timed out after {millis} ms.")]
    Timeout {
        /// Configured timeout in milliseconds.
        millis: u128,
    },

    /// The worker panicked or was cancelled.
    #[error("Pricing task failed: {0}")]
    TaskFailed(String),
}

impl BatchItemError {
    /// Client-facing messages.
    pub fn messages(&self) -> Vec<String> {
        match self {
            BatchItemError::Contract(err) => err.messages(),
            other => vec![other.to_string()],
        }
    }
}

/// Outcome of one batch item, tagged with its input position.
///
/// Serialises as `{"index": 0, "status": "ok", "result": {..}}` or
/// `{"index": 1, "status": "error", "errors": [..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchItemResult {
    /// Priced successfully.
    Ok {
        /// Input position.
        index: usize,
        /// Scaled premium and Greeks.
        result: PricingResult,
    },
    /// Rejected or failed.
    Error {
        /// Input position.
        index: usize,
        /// Client-facing messages.
        errors: Vec<String>,
    },
}

impl BatchItemResult {
    fn from_outcome(index: usize, outcome: Result<PricingResult, BatchItemError>) -> Self {
        match outcome {
            Ok(result) => BatchItemResult::Ok { index, result },
            Err(err) => BatchItemResult::Error {
                index,
                errors: err.messages(),
            },
        }
    }

    /// Input position.
    pub fn index(&self) -> usize {
        match self {
            BatchItemResult::Ok { index, .. } | BatchItemResult::Error { index, .. } => *index,
        }
    }

    /// Same outcome reported at `index`.
    pub fn reindexed(self, index: usize) -> Self {
        match self {
            BatchItemResult::Ok { result, .. } => BatchItemResult::Ok { index, result },
            BatchItemResult::Error { errors, .. } => BatchItemResult::Error { index, errors },
        }
    }

    /// `true` for a priced item.
    pub fn is_ok(&self) -> bool {
        matches!(self, BatchItemResult::Ok { .. })
    }
}

/// Prices batches of raw requests concurrently.
///
/// Clones share one semaphore, so the concurrency bound holds across
/// batches running at the same time.
///
/// # Examples
/// ```
/// use adapter_contract::{RawContractRequest, ReferenceRates};
/// use pricer_core::types::Date;
/// use pricer_pricing::{BulkDispatcher, BulkSettings, PricingDispatcher};
///
/// # tokio_test::block_on(async {
/// let bulk = BulkDispatcher::new(
///     PricingDispatcher::default(),
///     ReferenceRates::default(),
///     BulkSettings::default(),
/// );
/// let results = bulk
///     .dispatch(vec![RawContractRequest::default()], Date::from_ymd(2024, 1, 15).unwrap())
///     .await;
/// assert_eq!(results.len(), 1);
/// assert!(!results[0].is_ok());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct BulkDispatcher {
    dispatcher: PricingDispatcher,
    rates: Arc<ReferenceRates>,
    settings: BulkSettings,
    permits: Arc<Semaphore>,
}

impl BulkDispatcher {
    /// Creates a dispatcher with its own concurrency bound.
    pub fn new(dispatcher: PricingDispatcher, rates: ReferenceRates, settings: BulkSettings) -> Self {
        Self {
            dispatcher,
            rates: Arc::new(rates),
            permits: Arc::new(Semaphore::new(settings.max_concurrency.max(1))),
            settings,
        }
    }

    /// Concurrency and timeout settings.
    pub fn settings(&self) -> BulkSettings {
        self.settings
    }

    /// Reference rates used to resolve currency legs.
    pub fn rates(&self) -> &ReferenceRates {
        &self.rates
    }

    /// Single-contract dispatcher used for each item.
    pub fn dispatcher(&self) -> &PricingDispatcher {
        &self.dispatcher
    }

    /// Validates and prices every request against `today`.
    ///
    /// The output has one entry per input, in input order.
    pub async fn dispatch(
        &self,
        requests: Vec<RawContractRequest>,
        today: Date,
    ) -> Vec<BatchItemResult> {
        let dispatcher = self.dispatcher;
        let rates = Arc::clone(&self.rates);
        self.dispatch_with(requests, move |request| {
            dispatcher.price_request(request, today, &rates)
        })
        .await
    }

    /// Runs `price` over every request with the batch guarantees of
    /// [`dispatch`](Self::dispatch).
    pub async fn dispatch_with<F>(
        &self,
        requests: Vec<RawContractRequest>,
        price: F,
    ) -> Vec<BatchItemResult>
    where
        F: Fn(&RawContractRequest) -> Result<PricingResult, ContractError> + Send + Sync + 'static,
    {
        let batch_id = Uuid::new_v4();
        let size = requests.len();
        metrics::histogram!("pricer_bulk_batch_size").record(size as f64);
        let span = tracing::info_span!("bulk_batch", %batch_id, size);

        let price = Arc::new(price);
        let timeout = self.settings.item_timeout;
        async move {
            tracing::info!("Dispatching batch");
            let items = requests.into_iter().enumerate().map(|(index, request)| {
                let price = Arc::clone(&price);
                let permits = Arc::clone(&self.permits);
                async move {
                    let outcome = run_item(permits, timeout, move || (*price)(&request)).await;
                    if let Err(err) = &outcome {
                        tracing::debug!(index, error = %err, "Batch item failed");
                    }
                    BatchItemResult::from_outcome(index, outcome)
                }
            });

            let mut results = join_all(items).await;
            results.sort_by_key(BatchItemResult::index);
            let failed = results.iter().filter(|r| !r.is_ok()).count();
            tracing::info!(failed, "Batch complete");
            results
        }
        .instrument(span)
        .await
    }
}

async fn run_item<W>(
    permits: Arc<Semaphore>,
    timeout: Duration,
    work: W,
) -> Result<PricingResult, BatchItemError>
where
    W: FnOnce() -> Result<PricingResult, ContractError> + Send + 'static,
{
    let permit = permits
        .acquire_owned()
        .await
        .map_err(|e| BatchItemError::TaskFailed(e.to_string()))?;

    // The permit moves into the worker so it is held until the work ends,
    // even when the caller has already given up on it.
    let handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        work()
    });

    match tokio::time::timeout(timeout, handle).await {
        Err(_) => Err(BatchItemError::Timeout {
            millis: timeout.as_millis(),
        }),
        Ok(Err(join)) => Err(BatchItemError::TaskFailed(join_failure(join))),
        Ok(Ok(result)) => result.map_err(BatchItemError::from),
    }
}

fn join_failure(err: JoinError) -> String {
    if err.is_panic() {
        panic_message(err.into_panic())
    } else {
        err.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => message.to_string(),
            Err(_) => "unknown panic".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_contract::request::{
        CURRENCY_PAIR, EXERCISE, EXOTIC_TYPE, MATURITY, NOTIONAL, SPOT, STRIKE, TYPE, VOLATILITY,
    };

    fn today() -> Date {
        Date::from_ymd(2024, 3, 15).unwrap()
    }

    fn contract(strike: &str) -> RawContractRequest {
        RawContractRequest::from_pairs([
            (CURRENCY_PAIR, "EURUSD"),
            (MATURITY, "3M"),
            (STRIKE, strike),
            (NOTIONAL, "1000000"),
            (EXOTIC_TYPE, "VANILLA"),
            (EXERCISE, "E"),
            (TYPE, "CALL"),
            (SPOT, "1.08"),
            (VOLATILITY, "0.08"),
        ])
    }

    fn bulk(settings: BulkSettings) -> BulkDispatcher {
        BulkDispatcher::new(PricingDispatcher::default(), ReferenceRates::default(), settings)
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_order() {
        let requests = vec![contract("1.10"), contract(""), contract("1.05")];
        let results = bulk(BulkSettings::default()).dispatch(requests, today()).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(
            results[1],
            BatchItemResult::Error {
                index: 1,
                errors: vec!["STRIKE is empty".to_string()],
            }
        );
        assert!(results[2].is_ok());
        assert_eq!(
            results.iter().map(BatchItemResult::index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[tokio::test]
    async fn test_order_independent_of_completion() {
        let requests: Vec<_> = (0..8).map(|i| contract(&format!("{}", 8 - i))).collect();
        let results = bulk(BulkSettings::default())
            .dispatch_with(requests, |request| {
                // Earlier items sleep longer and finish last.
                let delay: u64 = request.get(STRIKE).parse().unwrap();
                std::thread::sleep(Duration::from_millis(delay * 5));
                Ok(PricingResult {
                    premium: delay as f64,
                    ..PricingResult::default()
                })
            })
            .await;

        for (i, item) in results.iter().enumerate() {
            let BatchItemResult::Ok { index, result } = item else {
                panic!("item {} failed", i);
            };
            assert_eq!(*index, i);
            assert_eq!(result.premium, (8 - i) as f64);
        }
    }

    #[tokio::test]
    async fn test_timeout_becomes_item_error() {
        let settings = BulkSettings {
            max_concurrency: 4,
            item_timeout: Duration::from_millis(20),
        };
        let requests = vec![contract("slow"), contract("fast")];
        let results = bulk(settings)
            .dispatch_with(requests, |request| {
                if request.get(STRIKE) == "slow" {
                    std::thread::sleep(Duration::from_millis(300));
                }
                Ok(PricingResult::default())
            })
            .await;

        assert_eq!(
            results[0],
            BatchItemResult::Error {
                index: 0,
                errors: vec!["Pricing timed out after 20 ms.".to_string()],
            }
        );
        assert!(results[1].is_ok());
    }

    #[tokio::test]
    async fn test_panic_becomes_item_error() {
        let requests = vec![contract("boom"), contract("1.10")];
        let results = bulk(BulkSettings::default())
            .dispatch_with(requests, |request| {
                if request.get(STRIKE) == "boom" {
                    panic!("engine exploded");
                }
                Ok(PricingResult::default())
            })
            .await;

        assert_eq!(
            results[0],
            BatchItemResult::Error {
                index: 0,
                errors: vec!["Pricing task failed: engine exploded".to_string()],
            }
        );
        assert!(results[1].is_ok());
    }

    #[tokio::test]
    async fn test_concurrency_bound_respected() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let settings = BulkSettings {
            max_concurrency: 2,
            item_timeout: Duration::from_secs(5),
        };
        let requests: Vec<_> = (0..6).map(|_| contract("1.10")).collect();

        let (r, p) = (Arc::clone(&running), Arc::clone(&peak));
        let results = bulk(settings)
            .dispatch_with(requests, move |_| {
                let now = r.fetch_add(1, Ordering::SeqCst) + 1;
                p.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(20));
                r.fetch_sub(1, Ordering::SeqCst);
                Ok(PricingResult::default())
            })
            .await;

        assert_eq!(results.len(), 6);
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let results = bulk(BulkSettings::default()).dispatch(Vec::new(), today()).await;
        assert!(results.is_empty());
    }

    #[test]
    fn test_result_wire_format() {
        let ok = BatchItemResult::Ok {
            index: 0,
            result: PricingResult {
                premium: 1.0,
                delta: 2.0,
                gamma: 3.0,
                vega: 4.0,
            },
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({
                "status": "ok",
                "index": 0,
                "result": {"premium": 1.0, "delta": 2.0, "gamma": 3.0, "vega": 4.0}
            })
        );

        let err = BatchItemResult::Error {
            index: 3,
            errors: vec!["SPOT is empty".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"status": "error", "index": 3, "errors": ["SPOT is empty"]})
        );
    }

    #[test]
    fn test_reindexed_keeps_outcome() {
        let err = BatchItemResult::Error {
            index: 0,
            errors: vec!["SPOT is empty".to_string()],
        };
        assert_eq!(
            err.reindexed(4),
            BatchItemResult::Error {
                index: 4,
                errors: vec!["SPOT is empty".to_string()],
            }
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const FAIL: &str = "FAIL";

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn batch_output_matches_input_positions(
                failing in proptest::collection::vec(any::<bool>(), 0..24),
                max_concurrency in 1usize..6,
            ) {
                let requests: Vec<_> = failing
                    .iter()
                    .enumerate()
                    .map(|(i, fail)| {
                        let request = contract(&(i + 1).to_string());
                        if *fail { request.with(FAIL, "1") } else { request }
                    })
                    .collect();

                let runtime = tokio::runtime::Builder::new_multi_thread()
                    .worker_threads(2)
                    .enable_all()
                    .build()
                    .unwrap();
                let dispatcher = bulk(BulkSettings {
                    max_concurrency,
                    ..BulkSettings::default()
                });
                let results = runtime.block_on(dispatcher.dispatch_with(requests, |request| {
                    if request.get(FAIL).is_empty() {
                        Ok(PricingResult {
                            premium: request.get(STRIKE).parse().unwrap(),
                            ..PricingResult::default()
                        })
                    } else {
                        Err(ContractError::Validation(vec!["rejected".to_string()]))
                    }
                }));

                prop_assert_eq!(results.len(), failing.len());
                for (i, (item, fail)) in results.iter().zip(&failing).enumerate() {
                    prop_assert_eq!(item.index(), i);
                    prop_assert_eq!(item.is_ok(), !*fail);
                    if let BatchItemResult::Ok { result, .. } = item {
                        prop_assert_eq!(result.premium, (i + 1) as f64);
                    }
                }
            }
        }
    }
}
