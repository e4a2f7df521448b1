//! Per-node knowledge cache for the informed strategies.
//!
//! The cache remembers, for a (node, resource) pair, whether the node
//! was observed to host the resource or observed not to. Informed
//! strategies consult it to prune provably fruitless neighbors and
//! update it on every visit. The instance is injectable: a caller may
//! hand the same cache to a sequence of queries so knowledge carries
//! over, or supply a fresh one per query.
//!
//! Entries only ever upgrade from [`Verdict::Unknown`] to a confirmed
//! verdict. The topology is static per run, so a confirmed verdict can
//! never legitimately change; contradictory later records are ignored.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::topology::Topology;

/// What the cache knows about a (node, resource) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No observation recorded yet
    Unknown,
    /// The node was visited and does not host the resource
    Absent,
    /// The node was visited and hosts the resource
    Present,
}

/// Shared, mutable memory of resource observations.
///
/// All access goes through a single internal mutex so that callers may
/// share one instance (behind an `Arc`) across concurrent queries; the
/// expected usage is still sequential queries against one topology.
#[derive(Debug, Default)]
pub struct KnowledgeCache {
    entries: Mutex<HashMap<(String, String), Verdict>>,
}

impl KnowledgeCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded verdict for (node, resource)
    pub fn verdict(&self, node: &str, resource: &str) -> Verdict {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(&(node.to_string(), resource.to_string()))
            .copied()
            .unwrap_or(Verdict::Unknown)
    }

    /// Returns true if the node is known to host the resource
    pub fn is_present(&self, node: &str, resource: &str) -> bool {
        self.verdict(node, resource) == Verdict::Present
    }

    /// Returns true if the node is known not to host the resource
    pub fn is_absent(&self, node: &str, resource: &str) -> bool {
        self.verdict(node, resource) == Verdict::Absent
    }

    /// Record that the node hosts the resource.
    ///
    /// A no-op if a confirmed verdict already exists: entries upgrade
    /// from Unknown exactly once and never flip afterwards.
    pub fn record_present(&self, node: &str, resource: &str) {
        self.record(node, resource, Verdict::Present);
    }

    /// Record that the node does not host the resource.
    ///
    /// Same upgrade-only rule as [`record_present`](Self::record_present).
    pub fn record_absent(&self, node: &str, resource: &str) {
        self.record(node, resource, Verdict::Absent);
    }

    fn record(&self, node: &str, resource: &str, verdict: Verdict) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries
            .entry((node.to_string(), resource.to_string()))
            .or_insert(Verdict::Unknown);
        if *entry == Verdict::Unknown {
            *entry = verdict;
        } else if *entry != verdict {
            log::warn!(
                "Ignoring contradictory cache record for ({}, {}): kept {:?}, got {:?}",
                node,
                resource,
                *entry,
                verdict
            );
        }
    }

    /// Pre-seed Present verdicts from the real resource placement.
    ///
    /// Gives informed queries full positive knowledge up front, the way
    /// the batch comparison driver warms its cache between runs.
    pub fn warm_from_topology(&self, topology: &Topology) {
        for node in topology.nodes() {
            for resource in &node.resources {
                self.record_present(&node.id, resource);
            }
        }
    }

    /// Number of confirmed entries
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .values()
            .filter(|v| **v != Verdict::Unknown)
            .count()
    }

    /// Returns true if no confirmed entry exists
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TopologyConfig;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    #[test]
    fn test_unseen_pairs_are_unknown() {
        let cache = KnowledgeCache::new();
        assert_eq!(cache.verdict("n1", "r1"), Verdict::Unknown);
        assert!(!cache.is_present("n1", "r1"));
        assert!(!cache.is_absent("n1", "r1"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_records_upgrade_from_unknown() {
        let cache = KnowledgeCache::new();
        cache.record_present("n1", "r1");
        cache.record_absent("n2", "r1");

        assert!(cache.is_present("n1", "r1"));
        assert!(cache.is_absent("n2", "r1"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_confirmed_verdicts_never_flip() {
        let cache = KnowledgeCache::new();
        cache.record_absent("n1", "r1");
        cache.record_present("n1", "r1");
        assert!(cache.is_absent("n1", "r1"));

        cache.record_present("n2", "r1");
        cache.record_absent("n2", "r1");
        assert!(cache.is_present("n2", "r1"));
    }

    #[test]
    fn test_warm_from_topology_seeds_present_entries() {
        let mut resources = BTreeMap::new();
        resources.insert("n1".to_string(), vec!["r1".to_string(), "r2".to_string()]);
        resources.insert("n2".to_string(), vec!["r3".to_string()]);
        let config = TopologyConfig {
            num_nodes: 2,
            min_neighbors: 1,
            max_neighbors: 1,
            resources,
            edges: vec![("n1".to_string(), "n2".to_string())],
        };
        let topology = Topology::from_config(&config).unwrap();

        let cache = KnowledgeCache::new();
        cache.warm_from_topology(&topology);

        assert!(cache.is_present("n1", "r1"));
        assert!(cache.is_present("n1", "r2"));
        assert!(cache.is_present("n2", "r3"));
        assert_eq!(cache.verdict("n2", "r1"), Verdict::Unknown);
    }

    #[test]
    fn test_cache_is_shareable_across_threads() {
        let cache = Arc::new(KnowledgeCache::new());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache.record_absent(&format!("n{}", i), "r1");
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 4);
    }
}
