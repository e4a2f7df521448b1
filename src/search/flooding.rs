//! Flooding and Informed Flooding: breadth-first fan-out.
//!
//! Both variants run the same BFS; the informed variant additionally
//! consults the knowledge cache to skip neighbors that are known not
//! to hold the resource (without spending a message on them) and
//! records a verdict for every node it visits.

use std::collections::VecDeque;

use crate::cache::KnowledgeCache;
use crate::search::result::{SearchOutcome, SearchResult};
use crate::search::{SearchQuery, Traversal};
use crate::topology::Topology;

/// Run a (possibly informed) flooding search.
///
/// Message accounting: one message per neighbor send. A node is
/// expanded at most once; each expansion sends to every neighbor that
/// the cache does not rule out, whether or not that neighbor was
/// already visited. The resource check happens on arrival, before any
/// further expansion.
pub(crate) fn run(
    topology: &Topology,
    cache: Option<&KnowledgeCache>,
    query: &SearchQuery,
) -> SearchResult {
    let mut traversal = Traversal::new();
    traversal.visit(&query.start);

    // Prior searches sharing the cache may already have confirmed the
    // resource at the start node; short-circuit without traversing.
    if let Some(cache) = cache {
        if cache.is_present(&query.start, &query.resource) {
            log::debug!(
                "Cache hit: '{}' already confirmed at start node '{}'",
                query.resource,
                query.start
            );
            return hit(traversal, 0, vec![query.start.clone()]);
        }
    }

    if topology.has_resource(&query.start, &query.resource) {
        if let Some(cache) = cache {
            cache.record_present(&query.start, &query.resource);
        }
        return hit(traversal, 0, vec![query.start.clone()]);
    }
    if let Some(cache) = cache {
        cache.record_absent(&query.start, &query.resource);
    }

    // Frontier of (node, depth, start-to-node path)
    let mut queue: VecDeque<(String, u32, Vec<String>)> = VecDeque::new();
    queue.push_back((query.start.clone(), 0, vec![query.start.clone()]));
    let mut ttl_truncated = false;
    let mut max_depth = 0;

    while let Some((current, depth, path)) = queue.pop_front() {
        for neighbor in topology.neighbors(&current) {
            if let Some(cache) = cache {
                if cache.is_absent(neighbor, &query.resource) {
                    // Provably fruitless; pruned without a message
                    continue;
                }
            }
            traversal.count_message();

            if !traversal.visit(neighbor) {
                continue;
            }
            let hop = depth + 1;
            max_depth = max_depth.max(hop);
            let mut new_path = path.clone();
            new_path.push(neighbor.clone());

            if topology.has_resource(neighbor, &query.resource) {
                if let Some(cache) = cache {
                    cache.record_present(neighbor, &query.resource);
                }
                return hit(traversal, hop, new_path);
            }
            if let Some(cache) = cache {
                cache.record_absent(neighbor, &query.resource);
            }

            if hop < query.ttl {
                queue.push_back((neighbor.clone(), hop, new_path));
            } else if topology.neighbors(neighbor).any(|n| !traversal.is_visited(n)) {
                // The hop budget cut off a node that still had
                // somewhere unexplored to forward to.
                ttl_truncated = true;
            }
        }
    }

    let outcome = if ttl_truncated {
        SearchOutcome::TtlExhausted
    } else {
        SearchOutcome::NotFound
    };
    SearchResult {
        outcome,
        messages: traversal.messages(),
        nodes_visited: traversal.visited_count(),
        hops: max_depth,
        trace: traversal.into_visit_order(),
    }
}

fn hit(traversal: Traversal, hops: u32, trace: Vec<String>) -> SearchResult {
    SearchResult {
        outcome: SearchOutcome::Found,
        messages: traversal.messages(),
        nodes_visited: traversal.visited_count(),
        hops,
        trace,
    }
}
