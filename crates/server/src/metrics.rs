use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static POSTINGS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "board_postings_created_total",
        "Total postings created"
    )
    .expect("register postings_created_total")
});

pub static QUOTA_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "board_posting_quota_rejected_total",
        "Total posting attempts rejected by the quota"
    )
    .expect("register posting_quota_rejected_total")
});

pub static SYMPATHY_CHANGES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "board_sympathy_changes_total",
        "Sympathy sign/cancel/toggle operations",
        &["action"]
    )
    .expect("register sympathy_changes_total")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

pub async fn metrics_handler() -> (axum::http::StatusCode, String) {
    encode_metrics()
}
