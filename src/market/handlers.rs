use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use super::{
    client::{MarketClient, MarketError, Relayed},
    dto::{MarketFailure, SummaryFailure, INVALID_COMPANY, MARKET_FAILURE, OVERALL_FAILURE},
};
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(overall_summary))
        .route("/:company/summary", get(market_summary))
}

#[instrument(skip_all, fields(principal = %user.0))]
pub async fn overall_summary(State(market): State<MarketClient>, user: AuthUser) -> Response {
    match market.overall_summary().await {
        Ok(relayed) => relay(relayed, market.strict_status()),
        Err(e) => {
            error!(error = %e, "overall summary unavailable");
            if market.strict_status() {
                ApiError::UpstreamUnavailable(OVERALL_FAILURE.into()).into_response()
            } else {
                Json(SummaryFailure {
                    message: OVERALL_FAILURE,
                })
                .into_response()
            }
        }
    }
}

/// Always 200 unless strict status is configured, whatever the upstream said.
#[instrument(skip_all, fields(principal = %user.0, %company))]
pub async fn market_summary(
    State(market): State<MarketClient>,
    user: AuthUser,
    Path(company): Path<String>,
) -> Response {
    match market.market_summary(&company).await {
        Ok(relayed) => relay(relayed, market.strict_status()),
        Err(MarketError::InvalidSymbol) => {
            if market.strict_status() {
                ApiError::BadRequest(INVALID_COMPANY.into()).into_response()
            } else {
                Json(MarketFailure {
                    message: INVALID_COMPANY,
                })
                .into_response()
            }
        }
        Err(e) => {
            error!(error = %e, "market summary unavailable");
            if market.strict_status() {
                ApiError::UpstreamUnavailable(MARKET_FAILURE.into()).into_response()
            } else {
                Json(MarketFailure {
                    message: MARKET_FAILURE,
                })
                .into_response()
            }
        }
    }
}

fn relay(relayed: Relayed, strict: bool) -> Response {
    let status = if strict { relayed.status } else { StatusCode::OK };
    (status, Json(relayed.body)).into_response()
}
