//! Data source abstraction for receiving status snapshots.
//!
//! This module provides a trait-based abstraction for receiving status data
//! from various sources (the live HTTP API, a JSON bundle on disk, or an
//! in-memory channel fed by an embedding application).

mod channel;
mod error;
mod file;
mod http;
mod snapshot;

pub use channel::ChannelSource;
pub use error::SourceError;
pub use file::FileSource;
pub use http::{fetch_snapshot, Endpoint, HttpSource, HttpSourceConfig, DEFAULT_BASE_URL};
pub use snapshot::{
    AffectedComponent, Component, ComponentStatus, ComponentsPayload, Impact, IncidentRecord,
    IncidentUpdate, IncidentsPayload, MaintenanceRecord, MaintenanceStatus, MaintenancesPayload,
    PageInfo, PageStatus, StatusPayload, StatusSnapshot,
};

use std::fmt::Debug;

/// Trait for receiving status snapshots from various sources.
///
/// Implementations of this trait provide whole snapshots; every snapshot
/// replaces the previous one.
///
/// # Example
///
/// ```
/// use statuswatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("snapshot.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} components", snapshot.components.components.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<StatusSnapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if the most recent fetch failed.
    fn error(&self) -> Option<&str>;

    /// Ask the source to fetch again as soon as possible.
    ///
    /// Sources that are re-read on every poll ignore this.
    fn request_refresh(&mut self) {}
}
