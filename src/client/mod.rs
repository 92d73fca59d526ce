//! Source abstraction for the wdmon server endpoints.
//!
//! This module defines the `DisruptionSource` trait that lets the TUI work
//! with different data sources (a live server or canned data) through a
//! unified interface.

mod http;
pub mod markup;
mod mock;

pub use http::HttpSource;
pub use mock::MockSource;

use crate::model::{DisruptionHistory, RetentionSettings, SaveStatus, WorkloadKey, WorkloadRow};

/// Error types that can occur while talking to the server.
#[derive(Debug, Clone)]
pub enum SourceError {
    /// Transport-level failure (connection refused, timeout, TLS).
    Transport(String),
    /// Unexpected HTTP status code.
    Status(u16),
    /// Response body could not be interpreted.
    Parse(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Transport(msg) => write!(f, "transport error: {}", msg),
            SourceError::Status(code) => write!(f, "unexpected HTTP status: {}", code),
            SourceError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

/// Abstraction over the wdmon server.
///
/// Object-safe so the TUI can hold a `Box<dyn DisruptionSource>`; tests and
/// the `--mock` demo mode substitute [`MockSource`].
pub trait DisruptionSource {
    /// Fetches the current page and extracts the workload table rows.
    ///
    /// This is the refresh cycle's suspension point. A failure must leave
    /// the caller free to keep its previous rows.
    fn fetch_workloads(&mut self) -> Result<Vec<WorkloadRow>, SourceError>;

    /// Fetches the disruption history for one workload, in server order.
    fn fetch_details(&mut self, key: &WorkloadKey) -> Result<DisruptionHistory, SourceError>;

    /// Reads the server-side retention settings.
    fn fetch_settings(&mut self) -> Result<RetentionSettings, SourceError>;

    /// Writes the retention settings. Only a `"ok"` status means accepted.
    fn save_settings(&mut self, settings: RetentionSettings) -> Result<SaveStatus, SourceError>;

    /// Human-readable endpoint description for the header bar.
    fn endpoint(&self) -> &str;
}
