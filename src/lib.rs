//! otelcol-diagnostics library
//!
//! Health checks and OTLP HTTP exporter diagnostics for OpenTelemetry
//! Collector deployments.

pub mod client;
pub mod config;
pub mod metrics;
pub mod monitor;
pub mod utils;
