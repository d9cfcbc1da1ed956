// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # statuswatch
//!
//! A terminal dashboard and library for Statuspage-style service status pages.
//!
//! This crate polls a status page API (overall status, components, scheduled
//! maintenances, unresolved incidents), organizes the flat component list
//! into Points of Presence and service groups, and renders a filterable view
//! in an interactive terminal UI.
//!
//! ## Architecture
//!
//! The crate is organized into five main modules:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(organize/│    │(render) │    │         │ │
//! │  └────┬────┘    │ filter)  │    └─────────┘    └─────────┘ │
//! │       │         └──────────┘                                │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource | ChannelSource    │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, filter and section expansion, navigation
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with implementations
//!   for HTTP polling, file polling and channel-based input, plus the wire types
//! - **[`data`]**: Component organization, filtering, status aggregation,
//!   classification and timestamp formatting
//! - **[`ui`]**: Terminal rendering using ratatui - incidents, maintenance and
//!   component views, and theme support
//! - **[`config`]**: Layered settings (defaults, file, environment)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the default status page
//! statuswatch
//!
//! # Another Statuspage-hosted page, only components with issues
//! statuswatch --url https://www.githubstatus.com --only-issues
//!
//! # Offline snapshot bundle
//! statuswatch --file snapshot.json
//! ```
//!
//! ### Organizing and filtering without the UI
//!
//! ```
//! use statuswatch::{DashboardData, FilterState};
//!
//! let data = DashboardData::parse(r#"{
//!     "components": { "components": [
//!         { "id": "g1", "name": "Europe", "group": true },
//!         { "id": "c1", "name": "Amsterdam - (AMS)", "status": "major_outage", "group_id": "g1" },
//!         { "id": "p1", "name": "Los Angeles (LAX)", "status": "operational" }
//!     ]}
//! }"#).unwrap();
//!
//! let view = data.view(&FilterState::new("", true));
//! assert!(view.points_of_presence.is_empty());
//! assert_eq!(view.groups[0].children[0].id, "c1");
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use statuswatch::{App, FileSource, FilterState};
//!
//! let source = Box::new(FileSource::new("snapshot.json"));
//! let app = App::new(source, FilterState::default());
//! ```
//!
//! ### As a library with HTTP source
//!
//! ```no_run
//! use statuswatch::{App, FilterState, HttpSource, HttpSourceConfig};
//!
//! # tokio_test::block_on(async {
//! let config = HttpSourceConfig {
//!     base_url: "https://www.githubstatus.com".to_string(),
//!     ..Default::default()
//! };
//! let source = HttpSource::spawn(config).unwrap();
//! let app = App::new(Box::new(source), FilterState::default());
//! # });
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use statuswatch::{App, ChannelSource, FilterState};
//!
//! // Create a channel for receiving snapshots
//! let (tx, source) = ChannelSource::create("embedded");
//!
//! // Create the app
//! let app = App::new(Box::new(source), FilterState::default());
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{DashboardData, DashboardView, FilterEvent, FilterState};
pub use source::{
    ChannelSource, Component, ComponentStatus, DataSource, FileSource, HttpSource,
    HttpSourceConfig, Impact, IncidentRecord, MaintenanceRecord, SourceError, StatusSnapshot,
};
