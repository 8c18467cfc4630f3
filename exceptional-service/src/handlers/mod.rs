//! HTTP handlers for exceptional-service.

pub mod fail_open;
pub mod ledger;
pub mod overflow;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::dtos::{EndpointInfo, InfoResponse};
use crate::services::get_metrics;

/// Health check endpoint for Docker/K8s liveness checks.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "exceptional-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

pub async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ready" })))
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

/// Category overview listing every endpoint in the group.
pub async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        category: "A10:2025 - Mishandling of Exceptional Conditions",
        description: "This category covers failures in handling edge cases, error conditions, \
            and exceptional situations that lead to security vulnerabilities.",
        vulnerabilities: vec![
            EndpointInfo {
                endpoint: "GET /api/exceptional/fail-open?token=",
                description: "Exception in auth causes fail-open access grant",
            },
            EndpointInfo {
                endpoint: "GET /api/exceptional/overflow?price=2147483647&quantity=2",
                description: "Integer overflow wraps to negative",
            },
            EndpointInfo {
                endpoint: "POST /api/exceptional/transfer",
                description: "No validation for negative amounts or self-transfers",
            },
            EndpointInfo {
                endpoint: "POST /api/exceptional/withdraw",
                description: "TOCTOU race condition allows overdraft",
            },
        ],
    })
}
