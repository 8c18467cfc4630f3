//! Transfer and withdraw handlers over the shared ledger.

use axum::{extract::State, Json};

use crate::dtos::{TransferRequest, TransferResponse, WithdrawRequest, WithdrawResponse};
use crate::services::{metrics, LedgerError};
use crate::startup::AppState;
use crate::utils::ValidatedJson;

pub async fn transfer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TransferRequest>,
) -> Result<Json<TransferResponse>, LedgerError> {
    tracing::info!(
        from = %payload.from,
        to = %payload.to,
        amount = %payload.amount,
        "Transfer requested"
    );

    match state
        .ledger
        .transfer(&payload.from, &payload.to, payload.amount)
        .await
    {
        Ok(outcome) => {
            metrics::record_transfer("ok");
            Ok(Json(TransferResponse::from(outcome)))
        }
        Err(err) => {
            tracing::warn!(error = %err, "Transfer failed");
            metrics::record_transfer(err.kind());
            Err(err)
        }
    }
}

pub async fn withdraw(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WithdrawRequest>,
) -> Result<Json<WithdrawResponse>, LedgerError> {
    tracing::info!(
        account = %payload.account,
        amount = %payload.amount,
        "Withdrawal requested"
    );

    match state.ledger.withdraw(&payload.account, payload.amount).await {
        Ok(outcome) => {
            metrics::record_withdrawal("ok");
            Ok(Json(WithdrawResponse::from(outcome)))
        }
        Err(err) => {
            metrics::record_withdrawal(err.kind());
            Err(err)
        }
    }
}
