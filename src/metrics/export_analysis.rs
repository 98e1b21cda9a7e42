//! OTLP HTTP exporter analysis
//!
//! Pulls the exporter and receiver counters out of a metrics scrape and derives
//! the success rate and queue utilization. Collector releases renamed these
//! metrics (unit suffixes such as `__datapoints__total` and `__batches_` were
//! added), so every field is looked up through an ordered list of names.

use serde::Serialize;

use super::exposition::{find_first, MetricQuery};

/// Label selecting the OTLP HTTP exporter's series
pub const OTLPHTTP_EXPORTER: &str = "exporter=\"otlphttp\"";

pub const SENT_METRICS: &[MetricQuery] = &[
    MetricQuery::with_label(
        "otelcol_exporter_sent_metric_points__datapoints__total",
        OTLPHTTP_EXPORTER,
    ),
    MetricQuery::with_label("otelcol_exporter_sent_metric_points_total", OTLPHTTP_EXPORTER),
];

pub const FAILED_METRICS: &[MetricQuery] = &[
    MetricQuery::with_label(
        "otelcol_exporter_send_failed_metric_points__datapoints__total",
        OTLPHTTP_EXPORTER,
    ),
    MetricQuery::with_label(
        "otelcol_exporter_send_failed_metric_points_total",
        OTLPHTTP_EXPORTER,
    ),
];

pub const QUEUE_SIZE: &[MetricQuery] = &[
    MetricQuery::with_label("otelcol_exporter_queue_size__batches_", OTLPHTTP_EXPORTER),
    MetricQuery::with_label("otelcol_exporter_queue_size", OTLPHTTP_EXPORTER),
];

pub const QUEUE_CAPACITY: &[MetricQuery] = &[
    MetricQuery::with_label("otelcol_exporter_queue_capacity__batches_", OTLPHTTP_EXPORTER),
    MetricQuery::with_label("otelcol_exporter_queue_capacity", OTLPHTTP_EXPORTER),
];

/// Receiver totals are summed over all receivers, so no label filter
pub const TOTAL_RECEIVED: &[MetricQuery] = &[
    MetricQuery::new("otelcol_receiver_accepted_metric_points__datapoints__total"),
    MetricQuery::new("otelcol_receiver_accepted_metric_points_total"),
];

/// Exporter statistics derived from one metrics scrape
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ExportAnalysis {
    pub sent_metrics: f64,
    pub failed_metrics: f64,
    pub queue_size: f64,
    pub queue_capacity: f64,
    pub total_received: f64,
    /// Percentage of export attempts that succeeded (0 when nothing was attempted)
    pub success_rate: f64,
    /// Queue fill percentage (0 when capacity is unknown). Not clamped to 100.
    pub queue_utilization: f64,
}

impl ExportAnalysis {
    /// Analyze raw exposition text
    pub fn analyze(metrics_text: &str) -> Self {
        let lookup = |queries: &[MetricQuery]| find_first(metrics_text, queries).unwrap_or(0.0);

        Self::from_counters(
            lookup(SENT_METRICS),
            lookup(FAILED_METRICS),
            lookup(QUEUE_SIZE),
            lookup(QUEUE_CAPACITY),
            lookup(TOTAL_RECEIVED),
        )
    }

    /// Build an analysis from already-extracted counters
    pub fn from_counters(
        sent_metrics: f64,
        failed_metrics: f64,
        queue_size: f64,
        queue_capacity: f64,
        total_received: f64,
    ) -> Self {
        let total_attempts = sent_metrics + failed_metrics;
        let success_rate = if total_attempts > 0.0 {
            sent_metrics / total_attempts * 100.0
        } else {
            0.0
        };

        let queue_utilization = if queue_capacity > 0.0 {
            queue_size / queue_capacity * 100.0
        } else {
            0.0
        };

        Self {
            sent_metrics,
            failed_metrics,
            queue_size,
            queue_capacity,
            total_received,
            success_rate,
            queue_utilization,
        }
    }

    /// Total export attempts (sent + failed)
    pub fn total_attempts(&self) -> f64 {
        self.sent_metrics + self.failed_metrics
    }
}
