//! Overall header status derived from unresolved incidents.
//!
//! Only incidents drive the headline. Component statuses and maintenances
//! are not consulted, even when components report degraded service on
//! their own.

use serde::Serialize;

use crate::source::{Impact, IncidentRecord};

/// Overall indicator and headline text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderStatus {
    pub indicator: Impact,
    pub description: &'static str,
}

/// Derive the header status from the full set of unresolved incidents.
///
/// First match wins: no incidents, any critical, any major, otherwise minor.
pub fn aggregate(incidents: &[IncidentRecord]) -> HeaderStatus {
    let (indicator, description) = if incidents.is_empty() {
        (Impact::None, "All Systems Operational")
    } else if incidents.iter().any(|i| i.impact == Impact::Critical) {
        (Impact::Critical, "Critical Service Outage")
    } else if incidents.iter().any(|i| i.impact == Impact::Major) {
        (Impact::Major, "Major Service Outage")
    } else {
        (Impact::Minor, "Minor Service Issues")
    };

    HeaderStatus {
        indicator,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(id: &str, impact: Impact) -> IncidentRecord {
        IncidentRecord {
            id: id.to_string(),
            impact,
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregate_empty() {
        let status = aggregate(&[]);
        assert_eq!(status.indicator, Impact::None);
        assert_eq!(status.description, "All Systems Operational");
    }

    #[test]
    fn test_aggregate_minor() {
        let status = aggregate(&[incident("i1", Impact::Minor)]);
        assert_eq!(status.indicator, Impact::Minor);
        assert_eq!(status.description, "Minor Service Issues");
    }

    #[test]
    fn test_aggregate_critical_regardless_of_order() {
        let forward = aggregate(&[incident("i1", Impact::Minor), incident("i2", Impact::Critical)]);
        let reverse = aggregate(&[incident("i2", Impact::Critical), incident("i1", Impact::Minor)]);
        assert_eq!(forward.indicator, Impact::Critical);
        assert_eq!(forward.description, "Critical Service Outage");
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_aggregate_major_over_minor() {
        let status = aggregate(&[
            incident("i1", Impact::Minor),
            incident("i2", Impact::Major),
            incident("i3", Impact::None),
        ]);
        assert_eq!(status.indicator, Impact::Major);
        assert_eq!(status.description, "Major Service Outage");
    }

    #[test]
    fn test_aggregate_none_impact_still_minor() {
        // An open incident always lifts the header above "none"
        let status = aggregate(&[
            incident("i1", Impact::None),
            incident("i2", Impact::Other("maintenance".to_string())),
        ]);
        assert_eq!(status.indicator, Impact::Minor);
    }
}
