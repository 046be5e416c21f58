//! Metrics setup and update for the query pipeline.

use prometheus::{IntCounter, Opts, Registry};

/// Counters maintained by the query pipeline.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub query_total: IntCounter,
    pub fallback_total: IntCounter,
    pub unsafe_query_total: IntCounter,
    pub cache_hit_total: IntCounter,
    pub upload_total: IntCounter,
}

impl Metrics {
    /// Set up counters used to produce Prometheus metrics.
    pub fn initialize(metrics_registry: &mut Registry) -> Result<Self, prometheus::Error> {
        let query_total = add_int_counter_metric(
            metrics_registry,
            "askdata_query_total",
            "Total successful queries.",
        )?;

        let fallback_total = add_int_counter_metric(
            metrics_registry,
            "askdata_fallback_total",
            "Total queries answered by the approximate fallback filter.",
        )?;

        let unsafe_query_total = add_int_counter_metric(
            metrics_registry,
            "askdata_unsafe_query_total",
            "Total candidate queries rejected by validation.",
        )?;

        let cache_hit_total = add_int_counter_metric(
            metrics_registry,
            "askdata_cache_hit_total",
            "Total questions answered from the precomputed query cache.",
        )?;

        let upload_total = add_int_counter_metric(
            metrics_registry,
            "askdata_upload_total",
            "Total datasets loaded.",
        )?;

        Ok(Self {
            query_total,
            fallback_total,
            unsafe_query_total,
            cache_hit_total,
            upload_total,
        })
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<IntCounter, prometheus::Error> {
    let int_counter = IntCounter::with_opts(Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}
