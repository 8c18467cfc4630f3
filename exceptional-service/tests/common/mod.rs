//! Common test utilities for exceptional-service integration tests.

use exceptional_service::config::{ExceptionalConfig, LedgerConfig};
use exceptional_service::services::LedgerStore;
use exceptional_service::startup::{AppState, Application};
use service_core::config::Config as CommonConfig;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,exceptional_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn test_config(withdraw_delay_ms: u64) -> ExceptionalConfig {
    ExceptionalConfig {
        common: CommonConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
        },
        service_name: "exceptional-service-test".to_string(),
        service_version: "test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        ledger: LedgerConfig { withdraw_delay_ms },
    }
}

/// State for router-level tests that don't need a socket.
#[allow(dead_code)]
pub fn test_state() -> AppState {
    init_tracing();
    AppState::new(test_config(LedgerConfig::default().withdraw_delay_ms))
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub ledger: LedgerStore,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_delay(LedgerConfig::default().withdraw_delay_ms).await
    }

    pub async fn spawn_with_delay(withdraw_delay_ms: u64) -> Self {
        init_tracing();

        let app = Application::build(test_config(withdraw_delay_ms))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);
        let ledger = app.ledger();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            ledger,
            client,
        }
    }

    #[allow(dead_code)]
    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    #[allow(dead_code)]
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
