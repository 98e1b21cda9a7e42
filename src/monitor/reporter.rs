//! Report rendering - console text and JSON
//!
//! A report is rendered into a single string before it is written, so a
//! report is either printed completely or not at all.

use std::fmt;
use std::io::Write;

use super::report::{DiagnosticsReport, ExportSection, HealthSection, MonitoringEndpoints};
use crate::config::OutputFormat;
use crate::metrics::{Assessment, ExportAnalysis, Severity};
use crate::utils::{format_count, format_percent, Result};

const BANNER_WIDTH: usize = 70;
const RULE_WIDTH: usize = 50;

/// Report renderer
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer {
    format: OutputFormat,
}

impl ReportRenderer {
    /// Create new renderer with specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render a report to a string
    pub fn render(&self, report: &DiagnosticsReport) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(TextReport(report).to_string()),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(report)?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    /// Render and write a report in one write
    pub fn write_report<W: Write>(&self, out: &mut W, report: &DiagnosticsReport) -> Result<()> {
        let rendered = self.render(report)?;
        out.write_all(rendered.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Console rendering of a [`DiagnosticsReport`]
pub struct TextReport<'a>(pub &'a DiagnosticsReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let banner = "=".repeat(BANNER_WIDTH);

        writeln!(f, "{}", banner)?;
        writeln!(f, "OTEL COLLECTOR DIAGNOSTICS")?;
        writeln!(f, "{}", banner)?;
        writeln!(f, "Timestamp: {}", report.timestamp)?;
        writeln!(f, "Host: {}", report.host)?;
        writeln!(f, "{}", banner)?;

        if let Some(health) = &report.health {
            write_health(f, health)?;
        }
        if let Some(export) = &report.export {
            write_export(f, export)?;
        }
        if let Some(endpoints) = &report.endpoints {
            write_endpoints(f, endpoints)?;
        }
        Ok(())
    }
}

fn write_heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

fn write_troubleshooting(f: &mut fmt::Formatter<'_>, steps: &[&str]) -> fmt::Result {
    writeln!(f, "Troubleshooting:")?;
    for step in steps {
        writeln!(f, "   - {}", step)?;
    }
    Ok(())
}

fn write_health(f: &mut fmt::Formatter<'_>, health: &HealthSection) -> fmt::Result {
    write_heading(f, "HEALTH CHECK")?;
    match health {
        HealthSection::Healthy { status, endpoint } => {
            writeln!(f, "{:<6} Status: {}", Severity::Ok.marker(), status)?;
            writeln!(f, "       Health Endpoint: {}", endpoint)
        }
        HealthSection::Unhealthy {
            message,
            troubleshooting,
        } => {
            writeln!(f, "{:<6} Status: {}", Severity::Critical.marker(), message)?;
            write_troubleshooting(f, troubleshooting)
        }
    }
}

fn write_export(f: &mut fmt::Formatter<'_>, export: &ExportSection) -> fmt::Result {
    write_heading(f, "OTLP HTTP EXPORTER STATISTICS")?;
    match export {
        ExportSection::Available {
            analysis,
            assessment,
        } => {
            write_analysis(f, analysis)?;
            write_assessment(f, assessment)
        }
        ExportSection::Unavailable {
            message,
            troubleshooting,
        } => {
            writeln!(
                f,
                "{:<6} Unable to fetch metrics: {}",
                Severity::Critical.marker(),
                message
            )?;
            write_troubleshooting(f, troubleshooting)
        }
    }
}

fn write_analysis(f: &mut fmt::Formatter<'_>, analysis: &ExportAnalysis) -> fmt::Result {
    let rows = [
        ("Metrics Sent", format_count(analysis.sent_metrics)),
        ("Failed Export Attempts", format_count(analysis.failed_metrics)),
        ("Success Rate", format_percent(analysis.success_rate)),
        ("Export Queue Size", format_count(analysis.queue_size)),
        ("Queue Capacity", format_count(analysis.queue_capacity)),
        ("Queue Utilization", format_percent(analysis.queue_utilization)),
        ("Total Metrics Received", format_count(analysis.total_received)),
    ];
    for (label, value) in rows {
        writeln!(f, "{:<24} {:>14}", format!("{}:", label), value)?;
    }
    Ok(())
}

fn write_assessment(f: &mut fmt::Formatter<'_>, assessment: &Assessment) -> fmt::Result {
    write_heading(f, "STATUS ASSESSMENT")?;

    let export = assessment.export_health;
    write!(f, "{:<6} Export Health: {}", export.severity().marker(), export.as_str())?;
    match export.hint() {
        Some(hint) => writeln!(f, " ({})", hint)?,
        None => writeln!(f)?,
    }

    let queue = assessment.queue_status;
    write!(f, "{:<6} Queue Status: {}", queue.severity().marker(), queue.as_str())?;
    match queue.hint() {
        Some(hint) => writeln!(f, " ({})", hint)?,
        None => writeln!(f)?,
    }

    for block in &assessment.recommendations {
        writeln!(f)?;
        writeln!(f, "{}:", block.heading)?;
        for step in block.steps {
            writeln!(f, "   - {}", step)?;
        }
    }
    Ok(())
}

fn write_endpoints(f: &mut fmt::Formatter<'_>, endpoints: &MonitoringEndpoints) -> fmt::Result {
    write_heading(f, "MONITORING ENDPOINTS")?;
    writeln!(f, "{:<22} {}", "Health Check:", endpoints.health)?;
    writeln!(f, "{:<22} {}", "Metrics (Prometheus):", endpoints.metrics)?;
    writeln!(f, "{:<22} {}", "zPages Web UI:", endpoints.zpages)?;
    for page in &endpoints.pages {
        writeln!(f, "   - {}: {}", page.name, page.url)?;
    }
    Ok(())
}
