//! Prometheus metrics for request counts and database latency.
//!
//! This module provides:
//! - Per-operation request counters
//! - Per-operation database latency histograms
//! - Installation of the Prometheus recorder rendered at `/metrics`

use std::time::{Duration, Instant};

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tracing::debug;

// === Metric Name Constants ===

/// Item requests counter metric name.
pub const METRIC_ITEM_REQUESTS: &str = "item_requests_total";
/// Database latency metric name.
pub const METRIC_DB_LATENCY: &str = "item_db_latency_ms";

/// How often histogram samples are drained into their summaries.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Install the global Prometheus recorder and describe all metrics.
/// Call this once at startup; the returned handle renders the scrape body.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Run recorder upkeep on a fixed interval until the task is aborted.
///
/// Without upkeep, histogram samples are only drained when `/metrics` is
/// scraped.
pub fn spawn_upkeep(handle: PrometheusHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            handle.run_upkeep();
        }
    })
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_ITEM_REQUESTS,
        "Total number of item API requests by operation"
    );
    describe_histogram!(
        METRIC_DB_LATENCY,
        "MongoDB operation latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment the request counter for an item operation.
pub fn inc_item_requests(operation: &'static str) {
    counter!(METRIC_ITEM_REQUESTS, "operation" => operation).increment(1);
}

/// Record database operation latency.
pub fn record_db_latency(start: Instant, operation: &'static str) {
    let latency_ms = elapsed_ms(start);
    histogram!(METRIC_DB_LATENCY, "operation" => operation).record(latency_ms);
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn elapsed_ms_measures_time() {
        let start = Instant::now();
        sleep(Duration::from_millis(10));
        assert!(elapsed_ms(start) >= 9.0); // Allow some tolerance
    }

    #[test]
    fn recording_without_recorder_is_a_noop() {
        inc_item_requests("find");
        record_db_latency(Instant::now(), "find");
    }

    #[tokio::test]
    async fn upkeep_task_runs_until_aborted() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, || {
            for _ in 0..1_000 {
                record_db_latency(Instant::now(), "find");
            }
        });

        let task = spawn_upkeep(handle.clone(), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!task.is_finished());

        assert!(handle.render().contains(METRIC_DB_LATENCY));

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
    }
}
