//! Batch pricing endpoint
//!
//! `POST /bulkwebpricer` prices every payload concurrently and answers with
//! one result per payload, in payload order.

use adapter_contract::RawContractRequest;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use pricer_pricing::BatchItemResult;
use serde::Deserialize;
use serde_json::Value;

use super::pricing::error_list;
use super::AppState;

/// Message for a payload that is not a field map.
pub const NOT_AN_OBJECT: &str = "Payload must be a JSON object of fields.";

/// Bulk pricing request body
///
/// Payloads stay untyped so a malformed item fails on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkPricingRequest {
    /// Raw contract field maps
    pub payloads: Vec<Value>,
}

/// Splits payloads into field maps to price and per-index rejections.
fn partition(payloads: Vec<Value>) -> (Vec<(usize, RawContractRequest)>, Vec<BatchItemResult>) {
    let mut requests = Vec::with_capacity(payloads.len());
    let mut rejected = Vec::new();
    for (index, payload) in payloads.into_iter().enumerate() {
        let parsed = match payload {
            Value::Object(_) => serde_json::from_value::<RawContractRequest>(payload).ok(),
            _ => None,
        };
        match parsed {
            Some(request) => requests.push((index, request)),
            None => rejected.push(BatchItemResult::Error {
                index,
                errors: vec![NOT_AN_OBJECT.to_string()],
            }),
        }
    }
    (requests, rejected)
}

/// Build the bulk routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/bulkwebpricer", post(bulk_web_pricer_handler))
}

/// POST /bulkwebpricer - Price a batch of contracts
///
/// Item failures are reported in place and never fail the batch.
async fn bulk_web_pricer_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkPricingRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return error_list(StatusCode::BAD_REQUEST, vec![rejection.body_text()]);
        }
    };

    let limit = state.config.bulk.max_batch_size;
    if body.payloads.len() > limit {
        tracing::warn!(size = body.payloads.len(), limit, "Batch rejected");
        metrics::counter!("pricer_bulk_batches_rejected_total").increment(1);
        return error_list(
            StatusCode::PAYLOAD_TOO_LARGE,
            vec![format!(
                "Batch of {} payloads exceeds the limit of {}.",
                body.payloads.len(),
                limit
            )],
        );
    }

    let (requests, rejected) = partition(body.payloads);
    if !rejected.is_empty() {
        tracing::warn!(count = rejected.len(), "Malformed payloads in batch");
    }
    let (positions, requests): (Vec<usize>, Vec<RawContractRequest>) =
        requests.into_iter().unzip();

    let priced = state
        .bulk
        .dispatch(requests, state.evaluation_date())
        .await;

    let mut results: Vec<BatchItemResult> = priced
        .into_iter()
        .zip(positions)
        .map(|(item, index)| item.reindexed(index))
        .chain(rejected)
        .collect();
    results.sort_by_key(BatchItemResult::index);
    (StatusCode::OK, Json(results)).into_response()
}
