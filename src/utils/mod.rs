//! Utility modules

pub mod error;
pub mod format;

pub use error::{DiagnosticsError, FetchError, Result};
pub use format::{format_count, format_percent};
