//! Dashboard data built from status snapshots.
//!
//! [`DashboardData`] is computed once per snapshot: components are organized
//! into sections and the header status is aggregated. [`DashboardView`] is
//! the filtered projection recomputed whenever the filter changes.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;

use super::aggregate::{aggregate, HeaderStatus};
use super::filter::{filter_components, filter_groups, filter_maintenances, FilterState};
use super::organize::{organize, ComponentGroup, Organized};
use crate::source::{Component, IncidentRecord, MaintenanceRecord, PageInfo, StatusSnapshot};

/// A collapsible section of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    ActiveMaintenance,
    UpcomingMaintenance,
    /// A service group, keyed by its root component id.
    Group(String),
}

/// Processed snapshot ready for display.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub page: PageInfo,
    pub header: HeaderStatus,
    pub organized: Organized,
    pub incidents: Vec<IncidentRecord>,
    pub active_maintenances: Vec<MaintenanceRecord>,
    pub upcoming_maintenances: Vec<MaintenanceRecord>,
    /// Number of component records in the raw snapshot.
    pub component_count: usize,
    pub last_updated: Instant,
}

impl DashboardData {
    /// Load and process a snapshot bundle from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a snapshot bundle from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        let snapshot: StatusSnapshot = serde_json::from_str(content)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Convert a raw snapshot into dashboard data.
    pub fn from_snapshot(snapshot: StatusSnapshot) -> Self {
        let StatusSnapshot {
            status,
            components,
            incidents,
            upcoming_maintenances,
            active_maintenances,
        } = snapshot;

        // status.json is authoritative for the page, components.json is
        // close enough when status.json came back empty
        let page = if status.page.updated_at.is_empty() {
            components.page.clone()
        } else {
            status.page
        };

        let organized = organize(&components.components);
        let header = aggregate(&incidents.incidents);

        Self {
            page,
            header,
            organized,
            incidents: incidents.incidents,
            active_maintenances: active_maintenances.scheduled_maintenances,
            upcoming_maintenances: upcoming_maintenances.scheduled_maintenances,
            component_count: components.components.len(),
            last_updated: Instant::now(),
        }
    }

    /// Filtered view plus header and incidents as one JSON document.
    pub fn export(&self, filter: &FilterState) -> serde_json::Value {
        let view = self.view(filter);
        serde_json::json!({
            "header": self.header,
            "page_updated": self.page.updated_at,
            "points_of_presence": view.points_of_presence,
            "groups": view.groups,
            "incidents": self.incidents,
            "active_maintenances": view.active_maintenances,
            "upcoming_maintenances": view.upcoming_maintenances,
            "filter": filter,
        })
    }

    /// Apply the filter to every section.
    pub fn view(&self, filter: &FilterState) -> DashboardView {
        DashboardView {
            points_of_presence: filter_components(&self.organized.points_of_presence, filter),
            groups: filter_groups(&self.organized.parent_groups, filter),
            active_maintenances: filter_maintenances(
                &self.active_maintenances,
                &filter.search_term,
            ),
            upcoming_maintenances: filter_maintenances(
                &self.upcoming_maintenances,
                &filter.search_term,
            ),
        }
    }
}

/// Filtered projection of [`DashboardData`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub points_of_presence: Vec<Component>,
    pub groups: Vec<ComponentGroup>,
    pub active_maintenances: Vec<MaintenanceRecord>,
    pub upcoming_maintenances: Vec<MaintenanceRecord>,
}

impl DashboardView {
    /// True when no component survived the filter (maintenances aside).
    pub fn has_no_components(&self) -> bool {
        self.points_of_presence.is_empty() && self.groups.is_empty()
    }

    /// Collapsible sections that still have visible entries.
    pub fn sections_with_results(&self) -> Vec<SectionId> {
        let mut sections = Vec::new();
        if !self.active_maintenances.is_empty() {
            sections.push(SectionId::ActiveMaintenance);
        }
        if !self.upcoming_maintenances.is_empty() {
            sections.push(SectionId::UpcomingMaintenance);
        }
        sections.extend(self.groups.iter().map(|g| SectionId::Group(g.parent.id.clone())));
        sections
    }

    /// Number of visible components across all sections.
    pub fn component_count(&self) -> usize {
        self.points_of_presence.len() + self.groups.iter().map(|g| g.children.len()).sum::<usize>()
    }
}
