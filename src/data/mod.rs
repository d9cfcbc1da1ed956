//! Data models and processing for status snapshots.
//!
//! This module turns raw status page payloads into the organized, filtered
//! structures the UI renders.
//!
//! ## Submodules
//!
//! - [`aggregate`]: Overall header status from unresolved incidents
//! - [`classify`]: Color/label lookup for statuses, impacts and maintenances
//! - [`dashboard`]: Per-snapshot [`DashboardData`] and its filtered [`DashboardView`]
//! - [`datetime`]: Lenient timestamp parsing and formatting
//! - [`filter`]: Search and issue predicates over flat and grouped components
//! - [`organize`]: Points of Presence and service group partitioning
//!
//! ## Data Flow
//!
//! ```text
//! StatusSnapshot (raw JSON)
//!        │
//!        ▼
//! DashboardData::from_snapshot()
//!        │
//!        ├──▶ organize()  (Points of Presence + service groups)
//!        ├──▶ aggregate() (header status)
//!        │
//!        ▼
//! DashboardData::view(&FilterState) ──▶ DashboardView
//! ```

pub mod aggregate;
pub mod classify;
pub mod dashboard;
pub mod datetime;
pub mod filter;
pub mod organize;

pub use aggregate::{aggregate, HeaderStatus};
pub use classify::{
    classify, classify_impact, classify_indicator, classify_maintenance, StatusClass, StatusColor,
};
pub use dashboard::{DashboardData, DashboardView, SectionId};
pub use datetime::{format_timestamp, format_timestamp_in, parse_timestamp};
pub use filter::{
    filter_components, filter_groups, filter_maintenances, matches_search, matches_status_filter,
    FilterEvent, FilterState,
};
pub use organize::{has_airport_code, organize, ComponentGroup, Organized};
