//! Display classification for statuses, impacts and maintenance states.
//!
//! Everything here is a fixed lookup. Values the table does not know fall
//! back to a neutral gray entry instead of failing.

use serde::Serialize;

use crate::source::{ComponentStatus, Impact, MaintenanceStatus};

/// Abstract display color. The UI theme maps these to terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Green,
    Yellow,
    Orange,
    Red,
    Blue,
    Gray,
}

/// Color and label for a classified value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusClass {
    pub color: StatusColor,
    pub label: String,
}

impl StatusClass {
    fn new(color: StatusColor, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
        }
    }
}

/// Color and label for a component status.
pub fn classify(status: ComponentStatus) -> StatusClass {
    match status {
        ComponentStatus::Operational => StatusClass::new(StatusColor::Green, "Operational"),
        ComponentStatus::PartialOutage => StatusClass::new(StatusColor::Yellow, "Re-routed"),
        ComponentStatus::MajorOutage => StatusClass::new(StatusColor::Red, "Major Outage"),
        ComponentStatus::UnderMaintenance => {
            StatusClass::new(StatusColor::Blue, "Partially Re-routed")
        }
        ComponentStatus::DegradedPerformance => {
            StatusClass::new(StatusColor::Yellow, "Degraded Performance")
        }
        ComponentStatus::Unknown => StatusClass::new(StatusColor::Gray, "Unknown Status"),
    }
}

/// Dot color for the overall header indicator.
pub fn classify_indicator(indicator: &Impact) -> StatusColor {
    match indicator {
        Impact::None => StatusColor::Green,
        Impact::Minor => StatusColor::Yellow,
        Impact::Major | Impact::Critical => StatusColor::Red,
        Impact::Other(_) => StatusColor::Gray,
    }
}

/// Badge for an incident's impact, e.g. "MAJOR IMPACT".
pub fn classify_impact(impact: &Impact) -> StatusClass {
    let label = format!("{} IMPACT", impact.as_str().replace('_', " ").to_uppercase());
    let color = match impact {
        Impact::Critical => StatusColor::Red,
        Impact::Major => StatusColor::Orange,
        _ => StatusColor::Yellow,
    };
    StatusClass::new(color, label)
}

/// Badge for a maintenance status, e.g. "in progress".
pub fn classify_maintenance(status: MaintenanceStatus) -> StatusClass {
    let label = status.as_str().replace('_', " ");
    let color = match status {
        MaintenanceStatus::Scheduled => StatusColor::Yellow,
        MaintenanceStatus::InProgress => StatusColor::Blue,
        _ => StatusColor::Gray,
    };
    StatusClass::new(color, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_table() {
        let cases = [
            (ComponentStatus::Operational, StatusColor::Green, "Operational"),
            (ComponentStatus::PartialOutage, StatusColor::Yellow, "Re-routed"),
            (ComponentStatus::MajorOutage, StatusColor::Red, "Major Outage"),
            (ComponentStatus::UnderMaintenance, StatusColor::Blue, "Partially Re-routed"),
            (ComponentStatus::DegradedPerformance, StatusColor::Yellow, "Degraded Performance"),
        ];
        for (status, color, label) in cases {
            let class = classify(status);
            assert_eq!(class.color, color, "{:?}", status);
            assert_eq!(class.label, label);
        }
    }

    #[test]
    fn test_classify_unknown_falls_back() {
        let status: ComponentStatus = serde_json::from_str(r#""on_fire""#).unwrap();
        let class = classify(status);
        assert_eq!(class.color, StatusColor::Gray);
        assert_eq!(class.label, "Unknown Status");
    }

    #[test]
    fn test_classify_indicator() {
        assert_eq!(classify_indicator(&Impact::None), StatusColor::Green);
        assert_eq!(classify_indicator(&Impact::Minor), StatusColor::Yellow);
        assert_eq!(classify_indicator(&Impact::Major), StatusColor::Red);
        assert_eq!(classify_indicator(&Impact::Critical), StatusColor::Red);
    }

    #[test]
    fn test_classify_impact_badge() {
        assert_eq!(classify_impact(&Impact::Critical).label, "CRITICAL IMPACT");
        assert_eq!(classify_impact(&Impact::Critical).color, StatusColor::Red);
        assert_eq!(classify_impact(&Impact::Major).color, StatusColor::Orange);
        assert_eq!(classify_impact(&Impact::Minor).color, StatusColor::Yellow);
        assert_eq!(classify_impact(&Impact::None).label, "NONE IMPACT");

        let raw = classify_impact(&Impact::Other("under_review".to_string()));
        assert_eq!(raw.label, "UNDER REVIEW IMPACT");
        assert_eq!(raw.color, StatusColor::Yellow);
    }

    #[test]
    fn test_classify_maintenance_badge() {
        let class = classify_maintenance(MaintenanceStatus::InProgress);
        assert_eq!(class.label, "in progress");
        assert_eq!(class.color, StatusColor::Blue);
        assert_eq!(classify_maintenance(MaintenanceStatus::Scheduled).color, StatusColor::Yellow);
        assert_eq!(classify_maintenance(MaintenanceStatus::Completed).color, StatusColor::Gray);
    }
}
