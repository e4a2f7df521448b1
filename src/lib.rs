//! # PeerSearch - Search-strategy simulator for unstructured P2P overlays
//!
//! This library simulates resource discovery in an unstructured
//! peer-to-peer overlay: given a graph of peers, a distribution of
//! resources across peers, and a query (start node, target resource,
//! time-to-live), it executes one of four search strategies and
//! reports cost/outcome metrics.
//!
//! ## Overview
//!
//! The simulation is single-process and synchronous; no real messages
//! are delivered anywhere. A "message" is one unit of simulated
//! communication cost: one per neighbor send for the flooding
//! strategies, one per hop for the walks.
//!
//! ## Key Features
//!
//! - **Four strategies**: `flooding`, `informed_flooding`,
//!   `random_walk`, `informed_random_walk` behind one contract
//! - **Knowledge cache**: injectable per-node memory that informed
//!   strategies consult to prune provably fruitless neighbors, and
//!   that callers may share across queries
//! - **Topology validation**: connectivity, degree bounds, resource
//!   coverage, and self-loop checks with an aggregated defect report
//! - **Reproducible**: fixed neighbor enumeration order for the
//!   flooding strategies and an injectable random source for the walks
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: topology configuration structures and JSON loading
//! - `topology`: the static overlay graph and its validator
//! - `cache`: the tri-state knowledge cache for informed strategies
//! - `search`: the strategy engine, query types, and result metrics
//!
//! ## Example Usage
//!
//! ```rust
//! use peersearch::config::TopologyConfig;
//! use peersearch::search::{run_search, SearchQuery, Strategy};
//! use peersearch::topology::{ensure_valid, Topology};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use std::collections::BTreeMap;
//!
//! let mut resources = BTreeMap::new();
//! resources.insert("n1".to_string(), vec!["r1".to_string()]);
//! resources.insert("n2".to_string(), vec!["r2".to_string()]);
//! let config = TopologyConfig {
//!     num_nodes: 2,
//!     min_neighbors: 1,
//!     max_neighbors: 1,
//!     resources,
//!     edges: vec![("n1".to_string(), "n2".to_string())],
//! };
//!
//! let topology = Topology::from_config(&config)?;
//! ensure_valid(&topology)?;
//!
//! let query = SearchQuery {
//!     start: "n1".to_string(),
//!     resource: "r2".to_string(),
//!     ttl: 10,
//!     strategy: Strategy::Flooding,
//! };
//! let mut rng = StdRng::seed_from_u64(42);
//! let result = run_search(&topology, None, &query, &mut rng)?;
//! assert!(result.found());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library errors are typed: [`topology::TopologyError`] at
//! construction, [`topology::ValidationReport`] from the validator,
//! and [`search::QueryError`] for malformed queries. A search that
//! does not locate the resource is a valid outcome in the
//! [`search::SearchResult`], never an error.

pub mod cache;
pub mod config;
pub mod search;
pub mod topology;
