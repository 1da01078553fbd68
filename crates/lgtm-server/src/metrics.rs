use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry};
use tracing::warn;

const NAMESPACE: &str = "lgtm";

lazy_static! {
    /// Provider calls, by `ApiService` operation.
    pub static ref GITHUB_API_CALLS: IntCounterVec = IntCounterVec::new(
        Opts::new("github_api_calls", "GitHub API calls").namespace(NAMESPACE),
        &["operation"]
    )
    .unwrap();

    /// Classified webhook deliveries, by hook kind.
    pub static ref WEBHOOK_HOOKS: IntCounterVec = IntCounterVec::new(
        Opts::new("webhook_hooks", "Classified webhook deliveries").namespace(NAMESPACE),
        &["kind"]
    )
    .unwrap();

    pub static ref RELEASE_MERGES: IntCounter = IntCounter::with_opts(
        Opts::new("release_merges", "Pull requests merged by release passes").namespace(NAMESPACE)
    )
    .unwrap();

    pub static ref RELEASE_FAILURES: IntCounter = IntCounter::with_opts(
        Opts::new("release_failures", "Failed release steps").namespace(NAMESPACE)
    )
    .unwrap();
}

pub(crate) fn record_api_call(operation: &str) {
    GITHUB_API_CALLS.with_label_values(&[operation]).inc();
}

fn register_collectors(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(GITHUB_API_CALLS.clone()))?;
    registry.register(Box::new(WEBHOOK_HOOKS.clone()))?;
    registry.register(Box::new(RELEASE_MERGES.clone()))?;
    registry.register(Box::new(RELEASE_FAILURES.clone()))?;

    #[cfg(target_os = "linux")]
    registry.register(Box::new(
        prometheus::process_collector::ProcessCollector::for_self(),
    ))?;

    Ok(())
}

pub(crate) fn build_metrics_handler() -> PrometheusMetrics {
    let metrics = PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint("/metrics")
        .build()
        .unwrap();

    if let Err(e) = register_collectors(&metrics.registry) {
        warn!(error = %e, message = "Could not register bot metrics");
    }

    metrics
}
