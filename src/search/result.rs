//! Search outcome and metrics types.

use std::fmt;

/// Terminal outcome of one search run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A visited node hosts the target resource
    Found,
    /// The reachable portion of the graph was explored without a match
    NotFound,
    /// The TTL hop budget ran out before a match
    TtlExhausted,
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Found => "found",
            Self::NotFound => "not_found",
            Self::TtlExhausted => "ttl_exhausted",
        };
        write!(f, "{}", name)
    }
}

/// Immutable record of one search execution, returned by value.
///
/// `trace` is the start-to-hit path when the search succeeds;
/// otherwise it is the visit order (flooding) or the complete walk
/// path (walks), for consumption by presentation layers.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// How the search terminated
    pub outcome: SearchOutcome,
    /// Simulated communication cost: one per neighbor send or hop
    pub messages: u64,
    /// Number of distinct nodes visited, including the start node
    pub nodes_visited: usize,
    /// Hop count at termination
    pub hops: u32,
    /// Ordered node ids describing the path or visit trace
    pub trace: Vec<String>,
}

impl SearchResult {
    /// Returns true if the target resource was located
    pub fn found(&self) -> bool {
        self.outcome == SearchOutcome::Found
    }
}
