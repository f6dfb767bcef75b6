// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::sync::OnceLock;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize telemetry (logs + metrics)
pub fn init_telemetry() {
    // 1. Initialize Tracing (Logs)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "spynet_node=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Initialize Metrics (Prometheus)
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROM_HANDLE.set(handle).is_err() {
                tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
            }
        }
        Err(e) => tracing::warn!("Metrics disabled: {}", e),
    }

    metrics::describe_counter!("spynet_operations_total", "Operations committed, by kind");
    metrics::describe_counter!("spynet_operations_rejected_total", "Operations rejected by the kernel, by kind");
    metrics::describe_counter!("spynet_masked_messages_total", "Sends admitted as masked entries");
    metrics::describe_counter!("spynet_commits_total", "Message counts committed to the ledger");
    metrics::describe_counter!("spynet_proof_steps_total", "Proof steps generated");
    metrics::describe_histogram!("spynet_prove_duration_seconds", "Time taken to prove a message batch");
    metrics::describe_histogram!("spynet_replay_duration_seconds", "Time taken to replay the operation log");

    // Ensure at least one metric exists on startup
    metrics::gauge!("spynet_node_up", 1.0);
}

/// Get the Prometheus handle to render metrics
pub fn get_metrics() -> String {
    if let Some(handle) = PROM_HANDLE.get() {
        handle.render()
    } else {
        "# metrics not initialized".to_string()
    }
}
