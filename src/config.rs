//! Topology configuration structures and JSON loading.
//!
//! The on-disk schema is the JSON object
//! `{num_nodes, min_neighbors, max_neighbors, resources, edges}`:
//! `resources` maps node ids to the list of resource ids each node
//! hosts, and `edges` is a list of two-element `[node, node]` pairs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use serde::{Deserialize, Serialize};

/// Declarative description of one overlay topology.
///
/// This is the construction entry point consumed by
/// [`Topology::from_config`](crate::topology::Topology::from_config);
/// the degree bounds are carried into the topology for validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyConfig {
    /// Total number of nodes; must equal the size of `resources`
    pub num_nodes: usize,
    /// Minimum allowed node degree (inclusive)
    pub min_neighbors: usize,
    /// Maximum allowed node degree (inclusive)
    pub max_neighbors: usize,
    /// Mapping from node id to the resource ids it hosts
    pub resources: BTreeMap<String, Vec<String>>,
    /// Undirected edge list as (node, node) pairs
    pub edges: Vec<(String, String)>,
}

/// Load a topology configuration from a JSON file.
///
/// # Arguments
/// * `path` - Path to the JSON topology file
///
/// # Returns
/// The parsed configuration, or an error with file/parse context
pub fn load_topology_config<P: AsRef<Path>>(path: P) -> Result<TopologyConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read topology file '{}'", path.display()))?;
    let config: TopologyConfig = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("Failed to parse topology file '{}'", path.display()))?;

    log::info!(
        "Loaded topology config from '{}': {} nodes, {} edges",
        path.display(),
        config.num_nodes,
        config.edges.len()
    );

    Ok(config)
}
