//! Random Walk and Informed Random Walk: a single wandering path.
//!
//! One active position moves to a uniformly chosen neighbor each step,
//! spending one message and one TTL unit per hop. The node just
//! arrived from is excluded from the choice whenever an alternative
//! exists; at a degree-1 dead end walking back is allowed. The
//! informed variant additionally drops neighbors the cache has
//! confirmed absent, falling back to an unrestricted choice among all
//! neighbors when that would leave nothing to pick.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cache::KnowledgeCache;
use crate::search::result::{SearchOutcome, SearchResult};
use crate::search::{SearchQuery, Traversal};
use crate::topology::Topology;

/// Run a (possibly informed) random walk.
///
/// All randomness comes from `rng`; a seeded generator reproduces the
/// exact path.
pub(crate) fn run<R: Rng>(
    topology: &Topology,
    cache: Option<&KnowledgeCache>,
    query: &SearchQuery,
    rng: &mut R,
) -> SearchResult {
    let mut traversal = Traversal::new();
    traversal.visit(&query.start);
    let mut trace = vec![query.start.clone()];

    if let Some(cache) = cache {
        if cache.is_present(&query.start, &query.resource) {
            log::debug!(
                "Cache hit: '{}' already confirmed at start node '{}'",
                query.resource,
                query.start
            );
            return hit(&traversal, 0, trace);
        }
    }

    if topology.has_resource(&query.start, &query.resource) {
        if let Some(cache) = cache {
            cache.record_present(&query.start, &query.resource);
        }
        return hit(&traversal, 0, trace);
    }
    if let Some(cache) = cache {
        cache.record_absent(&query.start, &query.resource);
    }

    let mut current = query.start.clone();
    let mut previous: Option<String> = None;
    let mut steps = 0;
    let mut outcome = SearchOutcome::TtlExhausted;

    while steps < query.ttl {
        let neighbors: Vec<&String> = topology.neighbors(&current).collect();
        if neighbors.is_empty() {
            // Stranded; nowhere left to walk
            outcome = SearchOutcome::NotFound;
            break;
        }

        // Avoid immediate backtracking when an alternative exists
        let mut candidates: Vec<&String> = neighbors
            .iter()
            .copied()
            .filter(|n| previous.as_deref() != Some(n.as_str()))
            .collect();
        if candidates.is_empty() {
            candidates = neighbors.clone();
        }

        if let Some(cache) = cache {
            let open: Vec<&String> = candidates
                .iter()
                .copied()
                .filter(|n| !cache.is_absent(n, &query.resource))
                .collect();
            // All ruled out: fall back to an unrestricted choice among
            // every neighbor rather than deadlocking
            candidates = if open.is_empty() { neighbors.clone() } else { open };
        }

        let next = match candidates.choose(rng) {
            Some(next) => (*next).clone(),
            // Unreachable: the fallbacks keep the candidate list non-empty
            None => break,
        };

        traversal.count_message();
        steps += 1;
        previous = Some(current);
        current = next;
        traversal.visit(&current);
        trace.push(current.clone());

        if topology.has_resource(&current, &query.resource) {
            if let Some(cache) = cache {
                cache.record_present(&current, &query.resource);
            }
            return hit(&traversal, steps, trace);
        }
        if let Some(cache) = cache {
            cache.record_absent(&current, &query.resource);
        }
    }

    SearchResult {
        outcome,
        messages: traversal.messages(),
        nodes_visited: traversal.visited_count(),
        hops: steps,
        trace,
    }
}

fn hit(traversal: &Traversal, hops: u32, trace: Vec<String>) -> SearchResult {
    SearchResult {
        outcome: SearchOutcome::Found,
        messages: traversal.messages(),
        nodes_visited: traversal.visited_count(),
        hops,
        trace,
    }
}
