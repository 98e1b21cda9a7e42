//! Error types for otelcol-diagnostics

use std::error::Error as StdError;
use std::io;
use thiserror::Error;

/// Top-level application error
///
/// Only startup problems end up here. Failures talking to the collector are
/// reported inside the diagnostics report as [`FetchError`]s instead.
#[derive(Error, Debug)]
pub enum DiagnosticsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),
}

/// Errors from a single GET against a collector endpoint
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection refused, DNS failure, reset, ...
    #[error("{}", error_chain(.0))]
    Transport(#[source] reqwest::Error),

    #[error("request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// Non-2xx HTTP status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body: {}", error_chain(.0))]
    Body(#[source] reqwest::Error),
}

impl FetchError {
    /// True for protocol-level failures (the server answered, but not with 2xx)
    pub fn is_protocol(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }
}

/// Render an error and its `source()` chain as "outer: inner: root"
///
/// reqwest only shows the outermost context ("error sending request for url"),
/// the actual cause (refused, DNS, reset) lives further down the chain.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut last = rendered.clone();
    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if message != last && !last.ends_with(&message) {
            rendered.push_str(": ");
            rendered.push_str(&message);
        }
        last = message;
        source = cause.source();
    }
    rendered
}

pub type Result<T> = std::result::Result<T, DiagnosticsError>;
