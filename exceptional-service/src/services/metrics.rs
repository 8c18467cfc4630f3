//! Prometheus metrics for exceptional-service.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::{Lazy, OnceCell};
use prometheus::{register_counter_vec, CounterVec, TextEncoder};
use service_core::error::AppError;

/// Recorder handle for the `metrics` facade used by the HTTP middleware.
static HTTP_METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub static TRANSFERS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "exceptional_transfers_total",
        "Total number of transfer requests",
        &["status"]
    )
    .expect("Failed to register transfers_total")
});

pub static WITHDRAWALS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "exceptional_withdrawals_total",
        "Total number of withdraw requests",
        &["status"] // ok, not_found, insufficient_funds
    )
    .expect("Failed to register withdrawals_total")
});

pub static AUTH_GATE_DECISIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "exceptional_auth_gate_decisions_total",
        "Token gate decisions by outcome and reason",
        &["access", "reason"]
    )
    .expect("Failed to register auth_gate_decisions_total")
});

pub static OVERFLOW_EVALUATIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "exceptional_overflow_evaluations_total",
        "Overflow evaluations by flagged result",
        &["overflowed"]
    )
    .expect("Failed to register overflow_evaluations_total")
});

/// Register service counters and install the HTTP metrics recorder.
pub fn init_metrics() -> Result<(), AppError> {
    Lazy::force(&TRANSFERS_TOTAL);
    Lazy::force(&WITHDRAWALS_TOTAL);
    Lazy::force(&AUTH_GATE_DECISIONS);
    Lazy::force(&OVERFLOW_EVALUATIONS);

    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!(
            "Failed to install Prometheus recorder: {}",
            e
        ))
    })?;
    HTTP_METRICS_HANDLE
        .set(handle)
        .map_err(|_| AppError::InternalError(anyhow::anyhow!("Metrics already initialized")))
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = HTTP_METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default();

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    output.push_str(&encoder.encode_to_string(&metric_families).unwrap_or_default());
    output
}

pub fn record_transfer(status: &str) {
    TRANSFERS_TOTAL.with_label_values(&[status]).inc();
}

pub fn record_withdrawal(status: &str) {
    WITHDRAWALS_TOTAL.with_label_values(&[status]).inc();
}

pub fn record_gate_decision(access: &str, reason: &str) {
    AUTH_GATE_DECISIONS.with_label_values(&[access, reason]).inc();
}

pub fn record_overflow(overflowed: bool) {
    OVERFLOW_EVALUATIONS
        .with_label_values(&[if overflowed { "true" } else { "false" }])
        .inc();
}
