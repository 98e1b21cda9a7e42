//! Diagnostics configuration derived from CLI arguments

use std::fmt;
use std::time::Duration;

use super::cli::{CliArgs, OutputFormat};

/// Collector health_check extension port
pub const HEALTH_PORT: u16 = 13133;
/// Collector internal telemetry (Prometheus) port
pub const METRICS_PORT: u16 = 8888;
/// Collector zpages extension port
pub const ZPAGES_PORT: u16 = 55679;

/// Upper bound for every GET against the collector
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// zPages served under the debug prefix: (path, display name)
pub const ZPAGES: &[(&str, &str)] = &[
    ("servicez", "ServiceZ"),
    ("pipelinez", "PipelineZ"),
    ("extensionz", "ExtensionZ"),
];

/// Resolved collector URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorEndpoints {
    pub host: String,
    pub health_url: String,
    pub metrics_url: String,
    pub zpages_url: String,
}

impl CollectorEndpoints {
    pub fn for_host(host: &str) -> Self {
        Self {
            host: host.to_string(),
            health_url: format!("http://{}:{}/health", host, HEALTH_PORT),
            metrics_url: format!("http://{}:{}/metrics", host, METRICS_PORT),
            zpages_url: format!("http://{}:{}/debug/", host, ZPAGES_PORT),
        }
    }

    /// URL of a single zPage, e.g. `servicez`
    pub fn zpage_url(&self, page: &str) -> String {
        format!("{}{}", self.zpages_url, page)
    }
}

impl fmt::Display for CollectorEndpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.host)
    }
}

/// Which report sections to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSections {
    pub health: bool,
    pub export_stats: bool,
    pub endpoints: bool,
}

impl ReportSections {
    /// Resolve the section selector flags
    ///
    /// `--metrics` and `--export-stats` both select the exporter statistics.
    /// With no selector at all, every section is shown.
    pub fn from_flags(health: bool, metrics: bool, export_stats: bool) -> Self {
        let none_selected = !(health || metrics || export_stats);
        Self {
            health: health || !(metrics || export_stats),
            export_stats: metrics || export_stats || !health,
            endpoints: none_selected,
        }
    }

    pub fn all() -> Self {
        Self::from_flags(false, false, false)
    }
}

impl Default for ReportSections {
    fn default() -> Self {
        Self::all()
    }
}

/// Complete diagnostics configuration
#[derive(Debug, Clone)]
pub struct DiagnosticsConfig {
    // Target
    pub endpoints: CollectorEndpoints,
    pub request_timeout: Duration,

    // Report
    pub sections: ReportSections,
    pub output_format: OutputFormat,

    // Monitoring
    pub continuous: bool,
    pub interval: Duration,

    // Logging
    pub quiet: bool,
    pub verbose: bool,
}

impl DiagnosticsConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        args.validate()?;

        Ok(Self {
            endpoints: CollectorEndpoints::for_host(args.host.trim()),
            request_timeout: REQUEST_TIMEOUT,

            sections: ReportSections::from_flags(args.health, args.metrics, args.export_stats),
            output_format: args.output_format,

            continuous: args.continuous,
            interval: Duration::from_secs(args.interval_secs),

            quiet: args.quiet,
            verbose: args.verbose,
        })
    }

    /// Configuration for `host` with every other setting at its default
    pub fn for_host(host: &str) -> Self {
        Self {
            endpoints: CollectorEndpoints::for_host(host),
            request_timeout: REQUEST_TIMEOUT,
            sections: ReportSections::all(),
            output_format: OutputFormat::Text,
            continuous: false,
            interval: Duration::from_secs(30),
            quiet: false,
            verbose: false,
        }
    }
}
