//! Request and response bodies for the exceptional-conditions endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::{Access, OverflowReport, TransferOutcome, WithdrawOutcome};

const TRANSFER_VULNERABILITY: &str = "No validation for negative amounts (reverses transfer), \
    self-transfers, zero amounts, or amounts exceeding balance.";
const WITHDRAW_VULNERABILITY: &str = "TOCTOU race condition: balance check and deduction are not atomic. \
    Send multiple concurrent requests to withdraw more than the balance allows.";
const OVERFLOW_VULNERABILITY: &str = "Integer overflow: i32::MAX * 2 wraps to a negative number. \
    This could allow purchasing items for negative prices or bypassing balance checks.";
const FAIL_OPEN_VULNERABILITY: &str = "Exception during authentication caused fail-open. \
    The error handler defaults the decision to granted instead of denied.";

pub const PROTECTED_PAYLOAD: &str = "This is sensitive data that should require authentication";

#[derive(Debug, Deserialize, Validate)]
pub struct TransferRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Provide 'from' and 'to' account names"))]
    pub from: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Provide 'from' and 'to' account names"))]
    pub to: String,

    #[serde(default)]
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WithdrawRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Provide an account name"))]
    pub account: String,

    #[serde(default)]
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct AccountBalance {
    pub account: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub from: AccountBalance,
    pub to: AccountBalance,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub transferred: Decimal,
    pub vulnerability: &'static str,
}

impl From<TransferOutcome> for TransferResponse {
    fn from(outcome: TransferOutcome) -> Self {
        Self {
            from: AccountBalance {
                account: outcome.from.name,
                balance: outcome.from.balance,
            },
            to: AccountBalance {
                account: outcome.to.name,
                balance: outcome.to.balance,
            },
            transferred: outcome.amount,
            vulnerability: TRANSFER_VULNERABILITY,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawResponse {
    pub account: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub withdrawn: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub previous_balance: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub new_balance: Decimal,
    pub vulnerability: &'static str,
}

impl From<WithdrawOutcome> for WithdrawResponse {
    fn from(outcome: WithdrawOutcome) -> Self {
        Self {
            account: outcome.account,
            withdrawn: outcome.amount,
            previous_balance: outcome.previous_balance,
            new_balance: outcome.new_balance,
            vulnerability: WITHDRAW_VULNERABILITY,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OverflowQuery {
    pub price: Option<i32>,
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct OverflowResponse {
    #[serde(flatten)]
    pub report: OverflowReport,
    pub vulnerability: &'static str,
}

impl From<OverflowReport> for OverflowResponse {
    fn from(report: OverflowReport) -> Self {
        Self {
            report,
            vulnerability: OVERFLOW_VULNERABILITY,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FailOpenQuery {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailOpenResponse {
    pub access: Access,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_data: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerability: Option<&'static str>,
}

impl FailOpenResponse {
    pub fn granted() -> Self {
        Self {
            access: Access::Granted,
            secret_data: Some(PROTECTED_PAYLOAD),
            vulnerability: Some(FAIL_OPEN_VULNERABILITY),
        }
    }

    pub fn denied() -> Self {
        Self {
            access: Access::Denied,
            secret_data: None,
            vulnerability: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub endpoint: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub category: &'static str,
    pub description: &'static str,
    pub vulnerabilities: Vec<EndpointInfo>,
}
