//! Search-strategy engine.
//!
//! Four strategies share one contract: given a read-only topology, an
//! optional knowledge cache, and a query, traverse the overlay and
//! return a [`SearchResult`]. The uninformed and informed variants of
//! each traversal discipline live in one implementation each, with the
//! cache as the only difference:
//!
//! - `flooding` / `informed_flooding`: breadth-first fan-out
//!   ([`flooding`] module)
//! - `random_walk` / `informed_random_walk`: single random path
//!   ([`walk`] module)
//!
//! Query errors are raised synchronously before any traversal begins;
//! a search that fails to locate the resource is a valid outcome, not
//! an error.

mod flooding;
pub mod result;
mod walk;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::cache::KnowledgeCache;
use crate::topology::Topology;

pub use result::{SearchOutcome, SearchResult};

/// The four search strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Flooding,
    InformedFlooding,
    RandomWalk,
    InformedRandomWalk,
}

impl Strategy {
    /// All strategies, in the order the comparison table prints them
    pub const ALL: [Strategy; 4] = [
        Strategy::Flooding,
        Strategy::InformedFlooding,
        Strategy::RandomWalk,
        Strategy::InformedRandomWalk,
    ];

    /// Returns true if this strategy consults the knowledge cache
    pub fn is_informed(&self) -> bool {
        matches!(self, Strategy::InformedFlooding | Strategy::InformedRandomWalk)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flooding => "flooding",
            Self::InformedFlooding => "informed_flooding",
            Self::RandomWalk => "random_walk",
            Self::InformedRandomWalk => "informed_random_walk",
        };
        write!(f, "{}", name)
    }
}

/// Error for unrecognized strategy names
#[derive(Debug, thiserror::Error)]
#[error("unknown strategy '{0}'; expected one of: flooding, informed_flooding, random_walk, informed_random_walk")]
pub struct UnknownStrategy(String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flooding" => Ok(Self::Flooding),
            "informed_flooding" => Ok(Self::InformedFlooding),
            "random_walk" => Ok(Self::RandomWalk),
            "informed_random_walk" => Ok(Self::InformedRandomWalk),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

/// One search invocation: start node, target resource, hop budget,
/// and the strategy to run. Immutable.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub start: String,
    pub resource: String,
    pub ttl: u32,
    pub strategy: Strategy,
}

/// Errors raised before any traversal begins
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("unknown start node '{0}'")]
    UnknownStartNode(String),

    #[error("resource '{0}' is not hosted by any node in the topology")]
    UnknownResource(String),

    #[error("invalid TTL {0}: the hop budget must be at least 1")]
    InvalidTtl(u32),
}

/// Execute one search against a pre-validated topology.
///
/// The caller is responsible for validating the topology first; the
/// engine does not re-check connectivity or degree bounds. Informed
/// strategies use `cache` when supplied and a fresh throwaway cache
/// otherwise; uninformed strategies ignore it. All randomness for the
/// walk strategies flows through `rng`, so a seeded generator makes a
/// run fully reproducible.
///
/// # Errors
/// [`QueryError`] if the TTL is zero, the start node does not exist,
/// or no node in the topology hosts the target resource.
pub fn run_search<R: Rng>(
    topology: &Topology,
    cache: Option<&KnowledgeCache>,
    query: &SearchQuery,
    rng: &mut R,
) -> Result<SearchResult, QueryError> {
    if query.ttl == 0 {
        return Err(QueryError::InvalidTtl(query.ttl));
    }
    if !topology.contains(&query.start) {
        return Err(QueryError::UnknownStartNode(query.start.clone()));
    }
    if !topology.hosts_resource_anywhere(&query.resource) {
        return Err(QueryError::UnknownResource(query.resource.clone()));
    }

    log::debug!(
        "Running {} search from '{}' for '{}' with TTL {}",
        query.strategy,
        query.start,
        query.resource,
        query.ttl
    );

    let fresh;
    let informed_cache = if query.strategy.is_informed() {
        Some(match cache {
            Some(cache) => cache,
            None => {
                fresh = KnowledgeCache::new();
                &fresh
            }
        })
    } else {
        None
    };

    let result = match query.strategy {
        Strategy::Flooding | Strategy::InformedFlooding => {
            flooding::run(topology, informed_cache, query)
        }
        Strategy::RandomWalk | Strategy::InformedRandomWalk => {
            walk::run(topology, informed_cache, query, rng)
        }
    };

    log::debug!(
        "{} search terminated: {} ({} messages, {} nodes visited, {} hops)",
        query.strategy,
        result.outcome,
        result.messages,
        result.nodes_visited,
        result.hops
    );

    Ok(result)
}

/// Shared accounting scaffolding for the strategy implementations.
///
/// Tracks the distinct-visit set in insertion order and the message
/// counter, so the strategies cannot diverge in how they count.
pub(crate) struct Traversal {
    visited: HashSet<String>,
    order: Vec<String>,
    messages: u64,
}

impl Traversal {
    pub(crate) fn new() -> Self {
        Self {
            visited: HashSet::new(),
            order: Vec::new(),
            messages: 0,
        }
    }

    /// Mark a node visited; returns true on the first visit
    pub(crate) fn visit(&mut self, node: &str) -> bool {
        if self.visited.insert(node.to_string()) {
            self.order.push(node.to_string());
            true
        } else {
            false
        }
    }

    pub(crate) fn is_visited(&self, node: &str) -> bool {
        self.visited.contains(node)
    }

    /// Count one simulated message (neighbor send or hop)
    pub(crate) fn count_message(&mut self) {
        self.messages += 1;
    }

    pub(crate) fn messages(&self) -> u64 {
        self.messages
    }

    pub(crate) fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Distinct visited nodes, in first-visit order
    pub(crate) fn into_visit_order(self) -> Vec<String> {
        self.order
    }
}
