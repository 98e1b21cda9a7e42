//! Configuration module

pub mod cli;
pub mod diagnostics_config;

pub use cli::{CliArgs, OutputFormat};
pub use diagnostics_config::{
    CollectorEndpoints, DiagnosticsConfig, ReportSections, HEALTH_PORT, METRICS_PORT,
    REQUEST_TIMEOUT, ZPAGES, ZPAGES_PORT,
};
