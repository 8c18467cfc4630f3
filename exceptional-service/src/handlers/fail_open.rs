//! Token gate handler. Errors during validation grant access.

use axum::{extract::Query, http::StatusCode, response::IntoResponse, Json};

use crate::dtos::{FailOpenQuery, FailOpenResponse};
use crate::services::{authorize, metrics};

pub async fn fail_open(Query(query): Query<FailOpenQuery>) -> impl IntoResponse {
    let decision = authorize(query.token.as_deref());

    tracing::info!(
        access = decision.access.as_str(),
        reason = decision.reason(),
        "Token gate decided"
    );
    metrics::record_gate_decision(decision.access.as_str(), decision.reason());

    if decision.is_granted() {
        (StatusCode::OK, Json(FailOpenResponse::granted()))
    } else {
        (StatusCode::FORBIDDEN, Json(FailOpenResponse::denied()))
    }
}
