//! Metrics analysis
//!
//! This module provides:
//! - Metric lookup in Prometheus exposition text
//! - OTLP HTTP exporter analysis (success rate, queue utilization)
//! - Tiered status assessment with recommendations

pub mod assessment;
pub mod export_analysis;
pub mod exposition;

pub use assessment::{
    Assessment, ExportHealth, QueueStatus, RecommendationBlock, RecommendationKind, Severity,
};
pub use export_analysis::ExportAnalysis;
pub use exposition::{find_first, find_metric, MetricQuery};
