//! Single-contract pricing endpoints
//!
//! - `POST /webpricer`: raw contract field map, scaled premium and Greeks
//! - `POST /vanillaoptionprice`: European vanilla from explicit market inputs

use adapter_contract::{ContractError, RawContractRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use pricer_pricing::{price_vanilla, PricingResult, VanillaOptionRequest};

use super::AppState;

/// Build the pricing routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/webpricer", post(web_pricer_handler))
        .route("/vanillaoptionprice", post(vanilla_option_price_handler))
}

/// Error list returned as a JSON array of strings
pub(crate) fn error_list(status: StatusCode, errors: Vec<String>) -> Response {
    (status, Json(errors)).into_response()
}

fn contract_error_response(err: &ContractError) -> Response {
    let status = match err {
        ContractError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    error_list(status, err.messages())
}

/// POST /webpricer - Price one contract
///
/// Returns `{premium, delta, gamma, vega}`, or a JSON array of error messages.
async fn web_pricer_handler(
    State(state): State<AppState>,
    payload: Result<Json<RawContractRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return error_list(StatusCode::BAD_REQUEST, vec![rejection.body_text()]);
        }
    };

    let today = state.evaluation_date();
    let bulk = state.bulk.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        bulk.dispatcher().price_request(&request, today, bulk.rates())
    })
    .await;

    match outcome {
        Ok(Ok(result)) => (StatusCode::OK, Json::<PricingResult>(result)).into_response(),
        Ok(Err(err)) => contract_error_response(&err),
        Err(join_err) => {
            tracing::error!(error = %join_err, "Pricing task failed");
            error_list(
                StatusCode::INTERNAL_SERVER_ERROR,
                vec![format!("Pricing task failed: {}", join_err)],
            )
        }
    }
}

/// POST /vanillaoptionprice - Price a European vanilla
///
/// Returns `{option_price}`; failures are plain text with status 400.
async fn vanilla_option_price_handler(
    payload: Result<Json<VanillaOptionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response(),
    };

    match tokio::task::spawn_blocking(move || price_vanilla(&request)).await {
        Ok(Ok(price)) => (StatusCode::OK, Json(price)).into_response(),
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "Vanilla pricing rejected");
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
        Err(join_err) => {
            tracing::error!(error = %join_err, "Pricing task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Pricing task failed: {}", join_err),
            )
                .into_response()
        }
    }
}
