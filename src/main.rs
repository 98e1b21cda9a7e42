//! otelcol-diagnostics - collector health and exporter diagnostics
//!
//! Polls the collector's health_check extension and internal telemetry,
//! analyzes the OTLP HTTP exporter counters and prints a status report,
//! once or on an interval.

use std::io;

use anyhow::Result;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use otelcol_diagnostics::client::HttpCollectorClient;
use otelcol_diagnostics::config::{CliArgs, DiagnosticsConfig};
use otelcol_diagnostics::monitor::{run_once, ContinuousMonitor, ReportRenderer, ShutdownSignal};

fn setup_logging(verbose: bool, quiet: bool) -> Result<()> {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Setup logging
    setup_logging(args.verbose, args.quiet)?;

    // Build configuration
    let config = DiagnosticsConfig::from_cli(&args)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    let client = HttpCollectorClient::new(config.request_timeout)?;
    let renderer = ReportRenderer::new(config.output_format);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.continuous {
        let shutdown = ShutdownSignal::new();
        shutdown.install_ctrl_c_handler()?;

        ContinuousMonitor::new(&client, &config, renderer, shutdown).run(&mut out)?;
    } else {
        run_once(&client, &config, &renderer, &mut out)?;
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
