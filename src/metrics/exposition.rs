//! Exposition-format metric lookup
//!
//! The collector's internal telemetry is scraped as Prometheus text. Rather than
//! tokenizing the whole document, lookups scan line by line:
//! - a line is a candidate when it starts with the metric name (prefix match)
//! - an optional label substring must appear somewhere in the line
//! - the value is the last whitespace-delimited token, parsed as `f64`
//!
//! Lines whose value does not parse are skipped and the scan continues.

use tracing::trace;

/// A single metric lookup: name prefix plus optional label constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricQuery {
    /// Metric name, matched as a line prefix
    pub name: &'static str,
    /// Substring that must appear verbatim in the line, e.g. `exporter="otlphttp"`
    pub label: Option<&'static str>,
}

impl MetricQuery {
    pub const fn new(name: &'static str) -> Self {
        Self { name, label: None }
    }

    pub const fn with_label(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label: Some(label),
        }
    }

    /// Check whether a line is a textual candidate for this query
    pub fn matches(&self, line: &str) -> bool {
        if !line.starts_with(self.name) {
            return false;
        }
        match self.label {
            Some(label) => line.contains(label),
            None => true,
        }
    }
}

/// Parse the trailing value token of an exposition line
fn parse_sample_value(line: &str) -> Option<f64> {
    line.split_whitespace().next_back()?.parse::<f64>().ok()
}

/// Find the first value for `query` in document order
pub fn find_metric(text: &str, query: &MetricQuery) -> Option<f64> {
    for line in text.lines() {
        if !query.matches(line) {
            continue;
        }
        match parse_sample_value(line) {
            Some(value) => return Some(value),
            None => trace!(metric = query.name, line, "skipping unparsable sample"),
        }
    }
    None
}

/// Evaluate an ordered fallback chain, returning the first present value
pub fn find_first(text: &str, queries: &[MetricQuery]) -> Option<f64> {
    queries.iter().find_map(|query| find_metric(text, query))
}
