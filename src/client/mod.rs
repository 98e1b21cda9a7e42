//! Collector endpoint access

pub mod collector_source;
pub mod http_client;

pub use collector_source::{CollectorSource, CollectorSourceExt};
pub use http_client::HttpCollectorClient;
