//! In-memory overlay graph.
//!
//! This file contains the static topology model: nodes, undirected
//! adjacency, and per-node resource sets. The topology is built once
//! from a [`TopologyConfig`](crate::config::TopologyConfig) and is
//! read-only for the lifetime of a simulation run.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::TopologyConfig;

/// Errors that can occur while constructing a topology from a config
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("num_nodes ({declared}) does not match the number of nodes in resources ({actual})")]
    NodeCountMismatch { declared: usize, actual: usize },

    #[error("edge ({a}, {b}) references node '{unknown}' which does not exist in resources")]
    UnknownEdgeEndpoint { a: String, b: String, unknown: String },
}

/// A single peer in the overlay.
///
/// Adjacency and hosted resources are fixed at construction time.
/// Both sets are ordered so that neighbor enumeration is reproducible,
/// which the flooding strategies rely on for deterministic testing.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique node identifier
    pub id: String,
    /// Resource identifiers hosted locally by this node
    pub resources: BTreeSet<String>,
    /// Identifiers of the node's direct neighbors
    pub neighbors: BTreeSet<String>,
}

impl Node {
    /// Returns the node's degree (number of neighbors)
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns true if this node hosts the given resource locally
    pub fn has_resource(&self, resource: &str) -> bool {
        self.resources.contains(resource)
    }
}

/// The full overlay topology for one simulation run.
///
/// Edges are undirected: construction inserts both directions of every
/// edge from the config's edge list. The degree bounds supplied at
/// construction are carried along for the validator; the search engine
/// never consults them.
#[derive(Debug, Clone)]
pub struct Topology {
    nodes: BTreeMap<String, Node>,
    min_neighbors: usize,
    max_neighbors: usize,
}

impl Topology {
    /// Build a topology from a parsed configuration.
    ///
    /// Every node listed in `resources` becomes a node in the graph,
    /// even if no edge touches it (the validator will then flag the
    /// partition). Self-loop edges are representable so that the
    /// validator can report them instead of construction failing.
    ///
    /// # Errors
    /// Returns [`TopologyError`] if `num_nodes` disagrees with the
    /// size of the resource map, or an edge references an unknown node.
    pub fn from_config(config: &TopologyConfig) -> Result<Self, TopologyError> {
        if config.num_nodes != config.resources.len() {
            return Err(TopologyError::NodeCountMismatch {
                declared: config.num_nodes,
                actual: config.resources.len(),
            });
        }

        let mut nodes: BTreeMap<String, Node> = config
            .resources
            .iter()
            .map(|(id, resources)| {
                (
                    id.clone(),
                    Node {
                        id: id.clone(),
                        resources: resources.iter().cloned().collect(),
                        neighbors: BTreeSet::new(),
                    },
                )
            })
            .collect();

        for (a, b) in &config.edges {
            for endpoint in [a, b] {
                if !nodes.contains_key(endpoint) {
                    return Err(TopologyError::UnknownEdgeEndpoint {
                        a: a.clone(),
                        b: b.clone(),
                        unknown: endpoint.clone(),
                    });
                }
            }
            // Undirected edge: insert both directions
            if let Some(node) = nodes.get_mut(a) {
                node.neighbors.insert(b.clone());
            }
            if let Some(node) = nodes.get_mut(b) {
                node.neighbors.insert(a.clone());
            }
        }

        log::debug!(
            "Constructed topology with {} nodes and {} edges",
            nodes.len(),
            config.edges.len()
        );

        Ok(Self {
            nodes,
            min_neighbors: config.min_neighbors,
            max_neighbors: config.max_neighbors,
        })
    }

    /// Returns the node with the given id, if present
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns true if a node with the given id exists
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns the neighbors of a node in a fixed, reproducible order.
    ///
    /// Unknown ids yield an empty iterator; the search engine only
    /// asks about nodes it has already arrived at.
    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &String> {
        self.nodes.get(id).into_iter().flat_map(|node| node.neighbors.iter())
    }

    /// Returns the degree of a node, or 0 for unknown ids
    pub fn degree(&self, id: &str) -> usize {
        self.nodes.get(id).map_or(0, Node::degree)
    }

    /// Returns true if the given node hosts the given resource locally
    pub fn has_resource(&self, id: &str, resource: &str) -> bool {
        self.nodes
            .get(id)
            .map_or(false, |node| node.has_resource(resource))
    }

    /// Returns true if any node in the topology hosts the resource
    pub fn hosts_resource_anywhere(&self, resource: &str) -> bool {
        self.nodes.values().any(|node| node.has_resource(resource))
    }

    /// Iterate over all nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the topology has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lower degree bound supplied at construction
    pub fn min_neighbors(&self) -> usize {
        self.min_neighbors
    }

    /// Upper degree bound supplied at construction
    pub fn max_neighbors(&self) -> usize {
        self.max_neighbors
    }
}
