//! Search and issue filtering over flat and grouped component collections.
//!
//! All functions are pure: they take the organized data plus a
//! [`FilterState`] and return fresh filtered copies. Filtering the output
//! again with the same state yields the same output.

use serde::Serialize;

use super::organize::ComponentGroup;
use crate::source::{Component, ComponentStatus, MaintenanceRecord};

/// Current search term and issue toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub search_term: String,
    pub only_issues: bool,
}

/// A change to the filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// Replace the search term (quick filters and CLI presets).
    SetSearch(String),
    /// Append a typed character.
    Push(char),
    /// Remove the last character.
    Pop,
    /// Clear the search term.
    ClearSearch,
    /// Flip "only show issues".
    ToggleOnlyIssues,
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, only_issues: bool) -> Self {
        Self {
            search_term: search_term.into(),
            only_issues,
        }
    }

    /// Apply an event, returning the next state.
    pub fn apply(self, event: FilterEvent) -> Self {
        let FilterState {
            mut search_term,
            mut only_issues,
        } = self;
        match event {
            FilterEvent::SetSearch(term) => search_term = term,
            FilterEvent::Push(c) => search_term.push(c),
            FilterEvent::Pop => {
                search_term.pop();
            }
            FilterEvent::ClearSearch => search_term.clear(),
            FilterEvent::ToggleOnlyIssues => only_issues = !only_issues,
        }
        Self {
            search_term,
            only_issues,
        }
    }

    /// Whether any filter narrows the view.
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || self.only_issues
    }

    /// Both predicates for one component.
    pub fn matches(&self, component: &Component) -> bool {
        matches_search(&component.name, &self.search_term)
            && matches_status_filter(component, self.only_issues)
    }
}

/// Case-insensitive substring search. An empty term matches everything,
/// an empty name matches only the empty term.
pub fn matches_search(name: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    if name.is_empty() {
        return false;
    }
    name.to_lowercase().contains(&term.to_lowercase())
}

/// With `only_issues` set, keeps components that are not operational.
pub fn matches_status_filter(component: &Component, only_issues: bool) -> bool {
    !only_issues || component.status != ComponentStatus::Operational
}

/// Filter a flat component list.
pub fn filter_components(components: &[Component], filter: &FilterState) -> Vec<Component> {
    components.iter().filter(|c| filter.matches(c)).cloned().collect()
}

/// Filter each group's children, dropping groups left without children.
///
/// The parent row is never tested against the filter.
pub fn filter_groups(groups: &[ComponentGroup], filter: &FilterState) -> Vec<ComponentGroup> {
    groups
        .iter()
        .filter_map(|group| {
            let children = filter_components(&group.children, filter);
            if children.is_empty() {
                None
            } else {
                Some(ComponentGroup {
                    parent: group.parent.clone(),
                    children,
                })
            }
        })
        .collect()
}

/// Filter maintenances by name. The issue toggle does not apply to them.
pub fn filter_maintenances(
    maintenances: &[MaintenanceRecord],
    term: &str,
) -> Vec<MaintenanceRecord> {
    maintenances.iter().filter(|m| matches_search(&m.name, term)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(id: &str, name: &str, status: ComponentStatus) -> Component {
        Component {
            id: id.to_string(),
            name: name.to_string(),
            status,
            ..Default::default()
        }
    }

    fn sample_groups() -> Vec<ComponentGroup> {
        vec![
            ComponentGroup {
                parent: component("g1", "Cloudflare Sites and Services", ComponentStatus::Operational),
                children: vec![
                    component("c1", "API", ComponentStatus::Operational),
                    component("c2", "DNS Root Servers", ComponentStatus::DegradedPerformance),
                    component("c3", "Workers KV", ComponentStatus::Operational),
                ],
            },
            ComponentGroup {
                parent: component("g2", "Europe", ComponentStatus::Operational),
                children: vec![
                    component("c4", "Amsterdam, Netherlands - (AMS)", ComponentStatus::Operational),
                    component("c5", "Berlin, Germany - (TXL)", ComponentStatus::PartialOutage),
                ],
            },
        ]
    }

    #[test]
    fn test_matches_search() {
        assert!(matches_search("anything", ""));
        assert!(matches_search("", ""));
        assert!(matches_search("API", "api"));
        assert!(matches_search("Workers KV", "ers k"));
        assert!(!matches_search("", "api"));
        assert!(!matches_search("DNS", "api"));
    }

    #[test]
    fn test_matches_status_filter() {
        let ok = component("a", "A", ComponentStatus::Operational);
        let degraded = component("b", "B", ComponentStatus::DegradedPerformance);
        let unknown = component("c", "C", ComponentStatus::Unknown);

        assert!(matches_status_filter(&ok, false));
        assert!(!matches_status_filter(&ok, true));
        assert!(matches_status_filter(&degraded, true));
        assert!(matches_status_filter(&unknown, true));
    }

    #[test]
    fn test_filter_components_combines_predicates() {
        let list = vec![
            component("p1", "Dallas (DFW)", ComponentStatus::Operational),
            component("p2", "Denver (DEN)", ComponentStatus::MajorOutage),
            component("p3", "Paris (CDG)", ComponentStatus::MajorOutage),
        ];

        let filtered = filter_components(&list, &FilterState::new("d", true));
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3"]);

        let filtered = filter_components(&list, &FilterState::new("de", true));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "p2");
    }

    #[test]
    fn test_filter_groups_hides_empty_groups() {
        let groups = sample_groups();

        let filtered = filter_groups(&groups, &FilterState::new("dns", false));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].parent.id, "g1");
        assert_eq!(filtered[0].children.len(), 1);
        assert_eq!(filtered[0].children[0].id, "c2");
    }

    #[test]
    fn test_filter_groups_parent_name_not_searched() {
        let groups = sample_groups();

        // "Europe" only matches a parent row, never a child
        let filtered = filter_groups(&groups, &FilterState::new("europe", false));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_groups_only_issues() {
        let groups = sample_groups();

        let filtered = filter_groups(&groups, &FilterState::new("", true));
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].children[0].id, "c2");
        assert_eq!(filtered[1].children[0].id, "c5");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let groups = sample_groups();
        let filter = FilterState::new("a", true);

        let once = filter_groups(&groups, &filter);
        let twice = filter_groups(&once, &filter);
        assert_eq!(once, twice);

        let flat: Vec<Component> = groups.iter().flat_map(|g| g.children.clone()).collect();
        let once = filter_components(&flat, &filter);
        assert_eq!(filter_components(&once, &filter), once);
    }

    #[test]
    fn test_filter_maintenances_ignores_issue_toggle() {
        let maintenances = vec![
            MaintenanceRecord {
                id: "m1".to_string(),
                name: "LHR datacenter maintenance".to_string(),
                ..Default::default()
            },
            MaintenanceRecord {
                id: "m2".to_string(),
                name: "Network upgrade".to_string(),
                ..Default::default()
            },
        ];

        assert_eq!(filter_maintenances(&maintenances, "").len(), 2);
        let filtered = filter_maintenances(&maintenances, "lhr");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "m1");
    }

    #[test]
    fn test_filter_state_transitions() {
        let state = FilterState::default()
            .apply(FilterEvent::Push('d'))
            .apply(FilterEvent::Push('n'))
            .apply(FilterEvent::Push('x'))
            .apply(FilterEvent::Pop)
            .apply(FilterEvent::ToggleOnlyIssues);
        assert_eq!(state, FilterState::new("dn", true));
        assert!(state.is_active());

        let state = state.apply(FilterEvent::ClearSearch).apply(FilterEvent::ToggleOnlyIssues);
        assert_eq!(state, FilterState::default());
        assert!(!state.is_active());

        let state = state.apply(FilterEvent::SetSearch("workers".to_string()));
        assert_eq!(state.search_term, "workers");

        // Popping an empty term is a no-op
        assert_eq!(FilterState::default().apply(FilterEvent::Pop), FilterState::default());
    }
}
