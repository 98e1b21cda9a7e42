//! Report cycles and scheduling
//!
//! This module provides:
//! - One report cycle over the health and metrics endpoints
//! - Console/JSON report rendering
//! - Single-shot and continuous scheduling
//! - Cooperative shutdown on Ctrl+C

pub mod report;
pub mod reporter;
pub mod scheduler;
pub mod shutdown;

pub use report::{
    check_health, export_statistics, DiagnosticsReport, ExportSection, HealthSection,
    MonitoringEndpoints, ZPage, HEALTH_TROUBLESHOOTING, METRICS_TROUBLESHOOTING,
};
pub use reporter::{ReportRenderer, TextReport};
pub use scheduler::{run_once, ContinuousMonitor};
pub use shutdown::ShutdownSignal;
