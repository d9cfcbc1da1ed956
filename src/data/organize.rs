//! Partitioning of the flat component list into display sections.
//!
//! A status page publishes its components as one flat list where group roots
//! and their members are linked by `group_id`. The dashboard shows two
//! sections built from that list:
//!
//! - **Points of Presence**: ungrouped components whose name carries an
//!   airport code in parentheses, e.g. `"Los Angeles, CA, United States - (LAX)"`.
//! - **Service groups**: each group root with its member components.
//!
//! Ungrouped components that are neither group roots nor Points of Presence
//! are dropped from both sections, as are members of unknown groups.

use std::collections::HashMap;

use serde::Serialize;

use crate::source::Component;

/// A group root with its member components, ordered by position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentGroup {
    pub parent: Component,
    pub children: Vec<Component>,
}

/// Result of [`organize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Organized {
    pub points_of_presence: Vec<Component>,
    pub parent_groups: Vec<ComponentGroup>,
}

/// Whether `name` contains an airport code such as `(LAX)`: three uppercase
/// ASCII letters wrapped in parentheses.
pub fn has_airport_code(name: &str) -> bool {
    name.as_bytes().windows(5).any(|w| {
        w[0] == b'(' && w[4] == b')' && w[1..4].iter().all(|b| b.is_ascii_uppercase())
    })
}

fn is_group_root(component: &Component) -> bool {
    component.is_group && component.parent_id().is_none()
}

/// Split `components` into Points of Presence and service groups.
///
/// Groups and their children are stably sorted by position (missing = 0), so
/// equal positions keep their input order. Never fails: missing fields fall
/// back to defaults and unclassifiable components are skipped.
pub fn organize(components: &[Component]) -> Organized {
    // First pass: group roots, in input order
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut parent_groups: Vec<ComponentGroup> = Vec::new();
    for component in components.iter().filter(|c| is_group_root(c)) {
        if index.contains_key(component.id.as_str()) {
            continue;
        }
        index.insert(component.id.as_str(), parent_groups.len());
        parent_groups.push(ComponentGroup {
            parent: component.clone(),
            children: Vec::new(),
        });
    }

    // Second pass: members and Points of Presence
    let mut points_of_presence = Vec::new();
    for component in components {
        match component.parent_id() {
            Some(group_id) => {
                if let Some(&slot) = index.get(group_id) {
                    parent_groups[slot].children.push(component.clone());
                }
            }
            None => {
                if !component.is_group && has_airport_code(&component.name) {
                    points_of_presence.push(component.clone());
                }
            }
        }
    }

    // sort_by_key is stable
    parent_groups.sort_by_key(|g| g.parent.position());
    for group in &mut parent_groups {
        group.children.sort_by_key(Component::position);
    }

    Organized {
        points_of_presence,
        parent_groups,
    }
}
