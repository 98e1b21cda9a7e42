//! Collector source trait for endpoint access
//!
//! This trait abstracts the HTTP GET used to talk to the collector so the
//! report orchestration can run against a scripted source in tests.
//!
//! The trait allows different implementations:
//! - `HttpCollectorClient`: blocking reqwest client with a request timeout
//! - test doubles returning canned bodies or errors

use crate::config::CollectorEndpoints;
use crate::utils::FetchError;

/// Base operation: a timed GET returning the body text
pub trait CollectorSource {
    /// Fetch `url`; non-2xx responses are errors
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Collector endpoint operations built on top of [`CollectorSource`]
pub trait CollectorSourceExt: CollectorSource {
    /// Query the health_check extension, returning the trimmed status body
    fn check_health(&self, endpoints: &CollectorEndpoints) -> Result<String, FetchError> {
        self.get(&endpoints.health_url)
            .map(|body| body.trim().to_string())
    }

    /// Scrape the collector's internal telemetry
    fn scrape_metrics(&self, endpoints: &CollectorEndpoints) -> Result<String, FetchError> {
        self.get(&endpoints.metrics_url)
    }
}

// Blanket implementation: any CollectorSource automatically gets CollectorSourceExt
impl<T: CollectorSource + ?Sized> CollectorSourceExt for T {}
