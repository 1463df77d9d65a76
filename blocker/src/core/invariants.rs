//! Semantic invariants for a game setup.

use std::collections::HashSet;

use crate::core::setup::Setup;

/// Check setup invariants the parser cannot express:
/// - At least one node
/// - Link endpoints in `[0, node_count)`, no self-links
/// - Gateway ids in `[0, node_count)`, no duplicates
pub fn validate_setup(setup: &Setup) -> Vec<String> {
    let mut errors = Vec::new();

    if setup.node_count == 0 {
        errors.push("node count must be > 0".to_string());
    }

    for (index, &(a, b)) in setup.links.iter().enumerate() {
        for endpoint in [a, b] {
            if endpoint >= setup.node_count {
                errors.push(format!(
                    "links[{}]: node {} out of range 0..{}",
                    index, endpoint, setup.node_count
                ));
            }
        }
        if a == b {
            errors.push(format!("links[{}]: self-link on node {}", index, a));
        }
    }

    let mut seen = HashSet::new();
    for (index, &gateway) in setup.gateways.iter().enumerate() {
        if gateway >= setup.node_count {
            errors.push(format!(
                "gateways[{}]: node {} out of range 0..{}",
                index, gateway, setup.node_count
            ));
        }
        if !seen.insert(gateway) {
            errors.push(format!("gateways[{}]: duplicate gateway {}", index, gateway));
        }
    }

    errors
}
