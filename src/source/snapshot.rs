//! Wire types for status page payloads.
//!
//! These types match the JSON documents served by a Statuspage-style
//! `api/v2` endpoint. Every field the dashboard does not strictly need is
//! optional or defaulted, so partial or slightly malformed payloads still
//! deserialize.

use serde::{Deserialize, Serialize};

/// Metadata about the status page itself, present in every payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    /// Raw ISO-8601 timestamp, possibly malformed.
    #[serde(default)]
    pub updated_at: String,
}

/// Operational status of a single component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Operational,
    PartialOutage,
    MajorOutage,
    UnderMaintenance,
    DegradedPerformance,
    /// Any value this client does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A component record from `components.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: ComponentStatus,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Marks a group root when set and `group_id` is absent.
    #[serde(default, rename = "group")]
    pub is_group: bool,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Ids of nested components, as listed on group roots.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
}

impl Component {
    /// Ordering key; a missing position sorts as 0.
    pub fn position(&self) -> i64 {
        self.position.unwrap_or(0)
    }

    /// The parent group id; an empty string counts as no parent.
    pub fn parent_id(&self) -> Option<&str> {
        self.group_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Incident severity.
///
/// Values outside the published levels keep their wire name in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Impact {
    #[default]
    None,
    Minor,
    Major,
    Critical,
    Other(String),
}

impl Impact {
    /// Wire name of the impact level.
    pub fn as_str(&self) -> &str {
        match self {
            Impact::None => "none",
            Impact::Minor => "minor",
            Impact::Major => "major",
            Impact::Critical => "critical",
            Impact::Other(raw) => raw,
        }
    }

    /// Severity rank. Unrecognized impacts rank lowest.
    pub fn severity(&self) -> u8 {
        match self {
            Impact::Other(_) => 0,
            Impact::None => 1,
            Impact::Minor => 2,
            Impact::Major => 3,
            Impact::Critical => 4,
        }
    }
}

impl From<String> for Impact {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "none" => Impact::None,
            "minor" => Impact::Minor,
            "major" => Impact::Major,
            "critical" => Impact::Critical,
            _ => Impact::Other(raw),
        }
    }
}

impl From<Impact> for String {
    fn from(impact: Impact) -> Self {
        match impact {
            Impact::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// A single progress update posted on an incident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentUpdate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub display_at: String,
}

/// An incident record from `incidents/unresolved.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub impact: Impact,
    /// Free-form lifecycle status ("investigating", "monitoring", ...).
    #[serde(default)]
    pub status: String,
    /// Newest update first, as served by the API.
    #[serde(default)]
    pub incident_updates: Vec<IncidentUpdate>,
    #[serde(default)]
    pub monitoring_at: Option<String>,
    #[serde(default)]
    pub resolved_at: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub shortlink: String,
}

impl IncidentRecord {
    /// The most recent update, if any was posted.
    pub fn latest_update(&self) -> Option<&IncidentUpdate> {
        self.incident_updates.first()
    }
}

/// Lifecycle status of a scheduled maintenance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Verifying,
    Completed,
    #[default]
    #[serde(other)]
    Other,
}

impl MaintenanceStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Scheduled => "scheduled",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Verifying => "verifying",
            MaintenanceStatus::Completed => "completed",
            MaintenanceStatus::Other => "other",
        }
    }
}

/// A component affected by a maintenance.
///
/// The API embeds full component records, older exports only carry ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AffectedComponent {
    Id(String),
    Record {
        id: String,
        #[serde(default)]
        name: String,
    },
}

impl AffectedComponent {
    pub fn id(&self) -> &str {
        match self {
            AffectedComponent::Id(id) => id,
            AffectedComponent::Record { id, .. } => id,
        }
    }
}

/// A scheduled maintenance record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub scheduled_for: String,
    #[serde(default)]
    pub scheduled_until: String,
    #[serde(default)]
    pub shortlink: String,
    #[serde(default)]
    pub components: Vec<AffectedComponent>,
}

/// Indicator published by the page in `status.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStatus {
    #[serde(default)]
    pub indicator: String,
    #[serde(default)]
    pub description: String,
}

/// Payload of `status.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    #[serde(default)]
    pub page: PageInfo,
    #[serde(default)]
    pub status: PageStatus,
}

/// Payload of `components.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentsPayload {
    #[serde(default)]
    pub page: PageInfo,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Payload of `incidents/unresolved.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentsPayload {
    #[serde(default)]
    pub page: PageInfo,
    #[serde(default)]
    pub incidents: Vec<IncidentRecord>,
}

/// Payload of both `scheduled-maintenances/{upcoming,active}.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenancesPayload {
    #[serde(default)]
    pub page: PageInfo,
    #[serde(default)]
    pub scheduled_maintenances: Vec<MaintenanceRecord>,
}

/// Everything fetched in one refresh cycle.
///
/// A snapshot always replaces the previous one as a whole. It is also the
/// on-disk bundle format read by [`FileSource`](super::FileSource).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub status: StatusPayload,
    #[serde(default)]
    pub components: ComponentsPayload,
    #[serde(default)]
    pub incidents: IncidentsPayload,
    #[serde(default)]
    pub upcoming_maintenances: MaintenancesPayload,
    #[serde(default)]
    pub active_maintenances: MaintenancesPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_components_payload() {
        let json = r#"{
            "page": { "id": "yh6f0r4529hb", "name": "Cloudflare", "updated_at": "2024-01-01T00:00:00Z" },
            "components": [
                { "id": "g1", "name": "Africa", "status": "operational", "group": true,
                  "group_id": null, "position": 3, "components": ["c1"] },
                { "id": "c1", "name": "Cairo, Egypt - (CAI)", "status": "partial_outage",
                  "updated_at": "2024-01-01T00:00:00Z", "group_id": "g1", "position": 1 },
                { "id": "x1", "status": "something_new" }
            ]
        }"#;

        let payload: ComponentsPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.page.name, "Cloudflare");
        assert_eq!(payload.components.len(), 3);

        let group = &payload.components[0];
        assert!(group.is_group);
        assert!(group.group_id.is_none());
        assert_eq!(group.position(), 3);

        let child = &payload.components[1];
        assert_eq!(child.status, ComponentStatus::PartialOutage);
        assert_eq!(child.group_id.as_deref(), Some("g1"));

        let unknown = &payload.components[2];
        assert_eq!(unknown.status, ComponentStatus::Unknown);
        assert_eq!(unknown.name, "");
        assert_eq!(unknown.position(), 0);
    }

    #[test]
    fn test_deserialize_incident() {
        let json = r#"{
            "incidents": [{
                "id": "i1",
                "name": "Elevated errors",
                "impact": "major",
                "status": "investigating",
                "shortlink": "https://stspg.io/abc",
                "monitoring_at": null,
                "incident_updates": [
                    { "body": "We are investigating.", "updated_at": "2024-01-01T00:05:00Z" }
                ]
            }]
        }"#;

        let payload: IncidentsPayload = serde_json::from_str(json).unwrap();
        let incident = &payload.incidents[0];
        assert_eq!(incident.impact, Impact::Major);
        assert!(incident.monitoring_at.is_none());
        assert_eq!(incident.latest_update().unwrap().body, "We are investigating.");
    }

    #[test]
    fn test_impact_severity() {
        assert!(Impact::Critical.severity() > Impact::Major.severity());
        assert!(Impact::Major.severity() > Impact::Minor.severity());
        assert!(Impact::Minor.severity() > Impact::None.severity());

        let parsed: Impact = serde_json::from_str(r#""maintenance""#).unwrap();
        assert_eq!(parsed, Impact::Other("maintenance".to_string()));
        assert!(parsed.severity() < Impact::None.severity());
    }

    #[test]
    fn test_impact_keeps_wire_name() {
        let parsed: Impact = serde_json::from_str(r#""under_review""#).unwrap();
        assert_eq!(parsed.as_str(), "under_review");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""under_review""#);
        assert_eq!(serde_json::to_string(&Impact::Major).unwrap(), r#""major""#);
    }

    #[test]
    fn test_maintenance_affected_components() {
        let json = r#"{
            "scheduled_maintenances": [{
                "id": "m1",
                "name": "DFW datacenter",
                "status": "in_progress",
                "impact": "maintenance",
                "components": ["c1", { "id": "c2", "name": "Dallas (DFW)" }]
            }]
        }"#;

        let payload: MaintenancesPayload = serde_json::from_str(json).unwrap();
        let maintenance = &payload.scheduled_maintenances[0];
        assert_eq!(maintenance.status, MaintenanceStatus::InProgress);
        let ids: Vec<&str> = maintenance.components.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[test]
    fn test_snapshot_bundle_defaults() {
        let snapshot: StatusSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.components.components.is_empty());
        assert!(snapshot.incidents.incidents.is_empty());
        assert!(snapshot.active_maintenances.scheduled_maintenances.is_empty());
    }
}
