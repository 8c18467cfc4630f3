//! Error types for the ledger and the token gate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use service_core::error::AppError;
use thiserror::Error;

/// Failures a ledger operation reports back to the caller. None is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Account '{0}' not found")]
    NotFound(String),

    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    #[error("Balance of account '{0}' would overflow")]
    Overflow(String),
}

impl LedgerError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::NotFound(_) => "not_found",
            LedgerError::InsufficientFunds { .. } => "insufficient_funds",
            LedgerError::Overflow(_) => "overflow",
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct InsufficientFundsResponse {
            error: &'static str,
            #[serde(with = "rust_decimal::serde::arbitrary_precision")]
            balance: Decimal,
            #[serde(with = "rust_decimal::serde::arbitrary_precision")]
            requested: Decimal,
        }

        match self {
            LedgerError::NotFound(name) => {
                AppError::NotFound(anyhow::anyhow!("Account '{}' not found", name)).into_response()
            }
            LedgerError::InsufficientFunds { balance, requested } => (
                StatusCode::BAD_REQUEST,
                Json(InsufficientFundsResponse {
                    error: "Insufficient funds",
                    balance,
                    requested,
                }),
            )
                .into_response(),
            err @ LedgerError::Overflow(_) => {
                AppError::BadRequest(anyhow::anyhow!(err.to_string())).into_response()
            }
        }
    }
}

/// Conditions raised while inspecting a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is missing")]
    MissingToken,

    #[error("token too short: {length} UTF-16 code units")]
    MalformedToken { length: usize },
}

impl TokenError {
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::MissingToken => "missing_token",
            TokenError::MalformedToken { .. } => "malformed_token",
        }
    }
}
