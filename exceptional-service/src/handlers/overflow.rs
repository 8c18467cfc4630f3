use axum::{extract::Query, Json};

use crate::dtos::{OverflowQuery, OverflowResponse};
use crate::services::{evaluate, metrics};

pub async fn overflow(Query(query): Query<OverflowQuery>) -> Json<OverflowResponse> {
    let report = evaluate(query.price, query.quantity);

    tracing::info!(
        price = report.price,
        quantity = report.quantity,
        total = report.total,
        overflowed = report.overflowed,
        "Overflow evaluated"
    );
    metrics::record_overflow(report.overflowed);

    Json(OverflowResponse::from(report))
}
