//! Command-line argument parsing

use clap::{Parser, ValueEnum};

/// Health and OTLP HTTP exporter diagnostics for an OpenTelemetry Collector
#[derive(Parser, Debug, Clone)]
#[command(name = "otelcol-diagnostics")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    // ===== Target =====
    /// Collector host
    #[arg(long = "host", env = "OTELCOL_HOST", default_value = "localhost")]
    pub host: String,

    // ===== Sections =====
    /// Show the health check section
    #[arg(long = "health")]
    pub health: bool,

    /// Show the metrics analysis (exporter statistics) section
    #[arg(long = "metrics")]
    pub metrics: bool,

    /// Show the exporter statistics section
    #[arg(long = "export-stats")]
    pub export_stats: bool,

    // ===== Monitoring =====
    /// Repeat the report until interrupted
    #[arg(long = "continuous")]
    pub continuous: bool,

    /// Seconds between reports in continuous mode
    #[arg(long = "interval", default_value_t = 30)]
    pub interval_secs: u64,

    // ===== Output =====
    /// Report format
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

/// Output format for reports
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument values
    ///
    /// Section selectors are never rejected in any combination.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("--host must not be empty".to_string());
        }

        if self.interval_secs == 0 {
            return Err("--interval must be at least 1 second".to_string());
        }

        Ok(())
    }

    /// True when no section selector was given
    pub fn no_section_selected(&self) -> bool {
        !(self.health || self.metrics || self.export_stats)
    }
}
