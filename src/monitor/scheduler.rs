//! Single-shot and continuous report scheduling

use std::io::Write;

use tracing::info;

use super::report::DiagnosticsReport;
use super::reporter::ReportRenderer;
use super::shutdown::ShutdownSignal;
use crate::client::CollectorSource;
use crate::config::{DiagnosticsConfig, OutputFormat};
use crate::utils::Result;

/// Produce and print exactly one report
pub fn run_once<S, W>(
    source: &S,
    config: &DiagnosticsConfig,
    renderer: &ReportRenderer,
    out: &mut W,
) -> Result<()>
where
    S: CollectorSource + ?Sized,
    W: Write,
{
    // A fresh signal is never triggered, so a report is always produced
    if let Some(report) = DiagnosticsReport::collect(source, config, &ShutdownSignal::new()) {
        renderer.write_report(out, &report)?;
    }
    Ok(())
}

/// Repeats the report on an interval until the shutdown signal fires
pub struct ContinuousMonitor<'a, S: CollectorSource + ?Sized> {
    source: &'a S,
    config: &'a DiagnosticsConfig,
    renderer: ReportRenderer,
    shutdown: ShutdownSignal,
}

impl<'a, S: CollectorSource + ?Sized> ContinuousMonitor<'a, S> {
    pub fn new(
        source: &'a S,
        config: &'a DiagnosticsConfig,
        renderer: ReportRenderer,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            source,
            config,
            renderer,
            shutdown,
        }
    }

    /// Run until interrupted, returning the number of reports printed
    ///
    /// Each cycle is fetch, analyze, print, then sleep. The signal is checked
    /// before every fetch and before every sleep; a cycle interrupted midway is
    /// dropped without printing anything.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<usize> {
        let interval_secs = self.config.interval.as_secs();
        let text = self.renderer.format() == OutputFormat::Text;

        info!(
            host = %self.config.endpoints,
            interval_secs,
            "starting continuous monitoring"
        );
        if text {
            writeln!(out, "Starting continuous monitoring (interval: {}s)", interval_secs)?;
            writeln!(out, "Press Ctrl+C to stop...")?;
            out.flush()?;
        }

        let mut cycles = 0usize;
        loop {
            let Some(report) =
                DiagnosticsReport::collect(self.source, self.config, &self.shutdown)
            else {
                break;
            };
            if self.shutdown.is_triggered() {
                break;
            }

            self.renderer.write_report(out, &report)?;
            cycles += 1;

            if self.shutdown.is_triggered() {
                break;
            }
            if text {
                writeln!(out)?;
                writeln!(out, "Sleeping for {} seconds...", interval_secs)?;
                writeln!(out, "{}", "=".repeat(70))?;
                out.flush()?;
            }
            if self.shutdown.wait_timeout(self.config.interval) {
                break;
            }
        }

        info!(cycles, "monitoring stopped");
        if text {
            writeln!(out)?;
            writeln!(out, "Monitoring stopped by user")?;
            out.flush()?;
        }
        Ok(cycles)
    }
}
