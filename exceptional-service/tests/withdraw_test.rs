//! Withdraw endpoint integration tests, including the check-then-act race.

mod common;

use common::TestApp;
use futures::future::join_all;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

#[tokio::test]
async fn single_withdrawal_deducts_amount() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/exceptional/withdraw",
            json!({ "account": "bob", "amount": 125 }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["account"], "bob");
    assert_eq!(body["withdrawn"], 125.0);
    assert_eq!(body["previousBalance"], 500.0);
    assert_eq!(body["newBalance"], 375.0);
    assert_eq!(app.ledger.get("bob").await.unwrap(), Decimal::from(375));
}

#[tokio::test]
async fn withdrawal_over_balance_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/exceptional/withdraw",
            json!({ "account": "bob", "amount": 501 }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Insufficient funds");
    assert_eq!(body["balance"], 500.0);
    assert_eq!(body["requested"], 501.0);
    assert_eq!(app.ledger.get("bob").await.unwrap(), Decimal::from(500));
}

#[tokio::test]
async fn withdrawal_from_unknown_account_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/exceptional/withdraw",
            json!({ "account": "ghost", "amount": 1 }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Account 'ghost' not found");
}

#[tokio::test]
async fn withdrawal_without_account_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/exceptional/withdraw", json!({ "amount": 1 }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Provide an account name");
}

#[tokio::test]
async fn negative_withdrawal_credits_account() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/exceptional/withdraw",
            json!({ "account": "bob", "amount": -100 }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.ledger.get("bob").await.unwrap(), Decimal::from(600));
}

#[tokio::test]
async fn negative_withdrawal_beyond_decimal_range_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/exceptional/withdraw",
            json!({ "account": "admin", "amount": "-79228162514264337593543950335" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Balance of account 'admin' would overflow");
    assert_eq!(
        app.ledger.get("admin").await.unwrap(),
        "9999.99".parse::<Decimal>().unwrap()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_withdrawals_overdraw_account() {
    // A long window makes every request pass the check before any deducts.
    let app = TestApp::spawn_with_delay(500).await;
    let amount = 400;
    let attempts = 5;

    // bob holds 500: exactly one withdrawal of 400 is fundable.
    let responses = join_all((0..attempts).map(|_| {
        app.post_json(
            "/api/exceptional/withdraw",
            json!({ "account": "bob", "amount": amount }),
        )
    }))
    .await;

    let succeeded = responses
        .iter()
        .filter(|r| r.status() == StatusCode::OK)
        .count();
    assert!(succeeded > 1, "expected the race to admit several withdrawals, got {}", succeeded);

    let final_balance = app.ledger.get("bob").await.unwrap();
    assert_eq!(
        final_balance,
        Decimal::from(500) - Decimal::from(amount) * Decimal::from(succeeded as i64)
    );
    assert!(final_balance < Decimal::ZERO);
}
