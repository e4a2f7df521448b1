//! Topology validation.
//!
//! This module checks the structural invariants a topology must hold
//! before any search runs against it: a single connected component,
//! degrees within the configured bounds, at least one resource per
//! node, and no self-loops. All categories are checked in one pass and
//! every violation is reported, so a caller sees the complete defect
//! list instead of fixing one problem at a time.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use crate::topology::graph::Topology;

/// Category of a structural violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// The graph has more than one connected component
    PartitionedTopology,
    /// A node's degree lies outside [min_neighbors, max_neighbors]
    DegreeViolation,
    /// A node hosts no resources at all
    MissingResource,
    /// A node lists itself as a neighbor
    SelfLoop,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PartitionedTopology => "partitioned_topology",
            Self::DegreeViolation => "degree_violation",
            Self::MissingResource => "missing_resource",
            Self::SelfLoop => "self_loop",
        };
        write!(f, "{}", name)
    }
}

/// One validation finding: its category, the offending node ids, and a
/// human-readable description.
#[derive(Debug, Clone)]
pub struct Violation {
    pub kind: ViolationKind,
    pub nodes: Vec<String>,
    pub description: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.description)
    }
}

/// Aggregated validation failure carrying every violation found
#[derive(Debug)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl std::error::Error for ValidationReport {}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "topology failed validation with {} violation(s):", self.violations.len())?;
        for violation in &self.violations {
            writeln!(f, "  - {}", violation)?;
        }
        Ok(())
    }
}

/// Run all structural checks against a topology.
///
/// Never mutates the input. Returns the full list of violations; an
/// empty list means the topology is usable by the search engine.
pub fn validate(topology: &Topology) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_connectivity(topology, &mut violations);
    check_degree_bounds(topology, &mut violations);
    check_resource_coverage(topology, &mut violations);
    check_self_loops(topology, &mut violations);

    if violations.is_empty() {
        log::debug!("Topology with {} nodes passed validation", topology.len());
    } else {
        log::warn!(
            "Topology failed validation with {} violation(s)",
            violations.len()
        );
    }

    violations
}

/// Validate a topology, turning any violations into a typed error.
///
/// Convenience wrapper over [`validate`] for callers that want a
/// `Result` at the construction boundary.
pub fn ensure_valid(topology: &Topology) -> Result<(), ValidationReport> {
    let violations = validate(topology);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationReport { violations })
    }
}

/// BFS from the first node; every node must be reached.
fn check_connectivity(topology: &Topology, violations: &mut Vec<Violation>) {
    let start = match topology.nodes().next() {
        Some(node) => node.id.clone(),
        None => return, // empty topology is trivially connected
    };

    let mut reached: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    reached.insert(&start);
    queue.push_back(&start);

    while let Some(current) = queue.pop_front() {
        for neighbor in topology.neighbors(current) {
            if reached.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    let unreachable: Vec<String> = topology
        .nodes()
        .filter(|node| !reached.contains(node.id.as_str()))
        .map(|node| node.id.clone())
        .collect();

    if !unreachable.is_empty() {
        violations.push(Violation {
            kind: ViolationKind::PartitionedTopology,
            description: format!(
                "topology is not connected; unreachable from '{}': {}",
                start,
                unreachable.join(", ")
            ),
            nodes: unreachable,
        });
    }
}

/// Every degree must lie in [min_neighbors, max_neighbors] inclusive.
fn check_degree_bounds(topology: &Topology, violations: &mut Vec<Violation>) {
    let min = topology.min_neighbors();
    let max = topology.max_neighbors();

    for node in topology.nodes() {
        let degree = node.degree();
        if degree < min || degree > max {
            violations.push(Violation {
                kind: ViolationKind::DegreeViolation,
                nodes: vec![node.id.clone()],
                description: format!(
                    "node '{}' has {} neighbors, outside bounds [{}, {}]",
                    node.id, degree, min, max
                ),
            });
        }
    }
}

fn check_resource_coverage(topology: &Topology, violations: &mut Vec<Violation>) {
    for node in topology.nodes() {
        if node.resources.is_empty() {
            violations.push(Violation {
                kind: ViolationKind::MissingResource,
                nodes: vec![node.id.clone()],
                description: format!("node '{}' hosts no resources", node.id),
            });
        }
    }
}

fn check_self_loops(topology: &Topology, violations: &mut Vec<Violation>) {
    for node in topology.nodes() {
        if node.neighbors.contains(&node.id) {
            violations.push(Violation {
                kind: ViolationKind::SelfLoop,
                nodes: vec![node.id.clone()],
                description: format!("node '{}' lists itself as a neighbor", node.id),
            });
        }
    }
}
