//! Cross-module scenarios driving the public API end to end: topology
//! construction from a JSON-shaped config, validation, and the four
//! search strategies sharing one knowledge cache.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use peersearch::cache::KnowledgeCache;
use peersearch::config::TopologyConfig;
use peersearch::search::{run_search, SearchOutcome, SearchQuery, Strategy};
use peersearch::topology::{validate, Topology};

fn build_topology(
    min_neighbors: usize,
    max_neighbors: usize,
    resources: &[(&str, &[&str])],
    edges: &[(&str, &str)],
) -> Topology {
    let resources: BTreeMap<String, Vec<String>> = resources
        .iter()
        .map(|(node, list)| {
            (
                node.to_string(),
                list.iter().map(|r| r.to_string()).collect(),
            )
        })
        .collect();
    let config = TopologyConfig {
        num_nodes: resources.len(),
        min_neighbors,
        max_neighbors,
        resources,
        edges: edges
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect(),
    };
    Topology::from_config(&config).unwrap()
}

/// Six nodes in an open chain: n1 - n2 - n3 - n4 - n5 - n6, with r6
/// hosted only at n6, five hops from n1.
fn six_node_chain() -> Topology {
    build_topology(
        1,
        2,
        &[
            ("n1", &["r1"]),
            ("n2", &["r2"]),
            ("n3", &["r3"]),
            ("n4", &["r4"]),
            ("n5", &["r5"]),
            ("n6", &["r6"]),
        ],
        &[
            ("n1", "n2"),
            ("n2", "n3"),
            ("n3", "n4"),
            ("n4", "n5"),
            ("n5", "n6"),
        ],
    )
}

fn query(start: &str, resource: &str, ttl: u32, strategy: Strategy) -> SearchQuery {
    SearchQuery {
        start: start.to_string(),
        resource: resource.to_string(),
        ttl,
        strategy,
    }
}

#[test]
fn six_node_scenario_flooding_visits_every_node() {
    let topology = six_node_chain();
    assert!(validate(&topology).is_empty());

    let mut rng = StdRng::seed_from_u64(0);
    let result = run_search(
        &topology,
        None,
        &query("n1", "r6", 10, Strategy::Flooding),
        &mut rng,
    )
    .unwrap();

    assert!(result.found());
    assert_eq!(result.nodes_visited, 6);
    assert_eq!(result.hops, 5);
    assert_eq!(result.trace.last().map(String::as_str), Some("n6"));
}

#[test]
fn six_node_scenario_short_walk_cannot_reach_the_target() {
    // n6 is five hops from n1; a TTL of 2 can never get there.
    let topology = six_node_chain();

    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = run_search(
            &topology,
            None,
            &query("n1", "r6", 2, Strategy::RandomWalk),
            &mut rng,
        )
        .unwrap();

        assert!(!result.found());
        assert!(result.hops <= 2);
    }
}

#[test]
fn flooding_finds_any_resource_reachable_within_ttl() {
    let topology = six_node_chain();
    let mut rng = StdRng::seed_from_u64(0);

    // r4 sits three hops from n1; any TTL >= 3 must find it
    for ttl in 3..8 {
        for strategy in [Strategy::Flooding, Strategy::InformedFlooding] {
            let result = run_search(
                &topology,
                None,
                &query("n1", "r4", ttl, strategy),
                &mut rng,
            )
            .unwrap();
            assert!(result.found(), "{} with TTL {} missed r4", strategy, ttl);
        }
    }

    // One hop short: the budget runs out instead
    let result = run_search(
        &topology,
        None,
        &query("n1", "r4", 2, Strategy::Flooding),
        &mut rng,
    )
    .unwrap();
    assert_eq!(result.outcome, SearchOutcome::TtlExhausted);
}

#[test]
fn informed_flooding_never_sends_more_than_flooding() {
    let topology = build_topology(
        1,
        4,
        &[
            ("n1", &["r1"]),
            ("n2", &["r2"]),
            ("n3", &["r3"]),
            ("n4", &["r4"]),
            ("n5", &["r5"]),
            ("n6", &["r6"]),
        ],
        &[
            ("n1", "n2"),
            ("n1", "n3"),
            ("n2", "n4"),
            ("n3", "n5"),
            ("n4", "n6"),
            ("n5", "n6"),
            ("n2", "n3"),
        ],
    );
    let cache = KnowledgeCache::new();
    let mut rng = StdRng::seed_from_u64(0);

    // First informed run populates the cache
    run_search(
        &topology,
        Some(&cache),
        &query("n1", "r6", 10, Strategy::InformedFlooding),
        &mut rng,
    )
    .unwrap();
    assert!(!cache.is_empty());

    for (start, resource) in [("n1", "r6"), ("n2", "r6"), ("n3", "r6")] {
        let plain = run_search(
            &topology,
            None,
            &query(start, resource, 10, Strategy::Flooding),
            &mut rng,
        )
        .unwrap();
        let informed = run_search(
            &topology,
            Some(&cache),
            &query(start, resource, 10, Strategy::InformedFlooding),
            &mut rng,
        )
        .unwrap();

        assert!(
            informed.messages <= plain.messages,
            "informed sent {} messages, plain sent {} (start {})",
            informed.messages,
            plain.messages,
            start
        );
    }
}

#[test]
fn shared_cache_accumulates_across_queries() {
    let topology = six_node_chain();
    let cache = KnowledgeCache::new();
    let mut rng = StdRng::seed_from_u64(0);

    let first = run_search(
        &topology,
        Some(&cache),
        &query("n1", "r6", 10, Strategy::InformedFlooding),
        &mut rng,
    )
    .unwrap();
    assert!(first.found());
    assert!(cache.is_present("n6", "r6"));

    // A later query starting at the confirmed node costs nothing
    let second = run_search(
        &topology,
        Some(&cache),
        &query("n6", "r6", 10, Strategy::InformedFlooding),
        &mut rng,
    )
    .unwrap();
    assert!(second.found());
    assert_eq!(second.messages, 0);

    // A verdict ruling out the backward direction pins the walk: with
    // n1 known absent, the walk from n2 can only advance toward n6
    // (predecessor exclusion handles the intermediate hops).
    let steering = KnowledgeCache::new();
    steering.record_absent("n1", "r6");
    let walk = run_search(
        &topology,
        Some(&steering),
        &query("n2", "r6", 10, Strategy::InformedRandomWalk),
        &mut rng,
    )
    .unwrap();
    assert!(walk.found());
    assert_eq!(walk.trace, vec!["n2", "n3", "n4", "n5", "n6"]);
}

#[test]
fn walk_determinism_with_identical_seeds() {
    let topology = build_topology(
        2,
        3,
        &[
            ("n1", &["r1"]),
            ("n2", &["r2"]),
            ("n3", &["r3"]),
            ("n4", &["r4"]),
            ("n5", &["r5"]),
            ("n6", &["r6"]),
        ],
        &[
            ("n1", "n2"),
            ("n2", "n3"),
            ("n3", "n4"),
            ("n4", "n5"),
            ("n5", "n6"),
            ("n6", "n1"),
            ("n1", "n4"),
        ],
    );

    for strategy in [Strategy::RandomWalk, Strategy::InformedRandomWalk] {
        let mut first_rng = StdRng::seed_from_u64(99);
        let mut second_rng = StdRng::seed_from_u64(99);
        let first = run_search(
            &topology,
            None,
            &query("n2", "r5", 6, strategy),
            &mut first_rng,
        )
        .unwrap();
        let second = run_search(
            &topology,
            None,
            &query("n2", "r5", 6, strategy),
            &mut second_rng,
        )
        .unwrap();

        assert_eq!(first.trace, second.trace);
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.messages, second.messages);
        assert_eq!(first.nodes_visited, second.nodes_visited);
    }
}

#[test]
fn all_four_strategies_share_one_contract() {
    let topology = six_node_chain();
    let cache = KnowledgeCache::new();
    let mut rng = StdRng::seed_from_u64(1);

    for strategy in Strategy::ALL {
        let result = run_search(
            &topology,
            Some(&cache),
            &query("n1", "r6", 20, strategy),
            &mut rng,
        )
        .unwrap();

        // With a generous TTL on a chain, every strategy ends at n6:
        // the walks can only oscillate or advance, and 20 hops cover
        // the worst case the seeds above produce.
        assert!(result.hops <= 20);
        assert!(result.nodes_visited <= 6);
        if result.found() {
            assert_eq!(result.trace.last().map(String::as_str), Some("n6"));
        }
    }
}

#[test]
fn warmed_cache_short_circuits_immediately() {
    let topology = six_node_chain();
    let cache = KnowledgeCache::new();
    cache.warm_from_topology(&topology);
    let mut rng = StdRng::seed_from_u64(0);

    for strategy in [Strategy::InformedFlooding, Strategy::InformedRandomWalk] {
        let result = run_search(
            &topology,
            Some(&cache),
            &query("n6", "r6", 10, strategy),
            &mut rng,
        )
        .unwrap();
        assert!(result.found());
        assert_eq!(result.messages, 0);
        assert_eq!(result.trace, vec!["n6"]);
    }
}

#[test]
fn validator_accepts_exactly_the_invariant_holding_topologies() {
    // Connected, degrees in range, every node hosts something, no
    // self-loops: no violations.
    let good = six_node_chain();
    assert!(validate(&good).is_empty());

    // Breaking any single invariant produces a violation.
    let partitioned = build_topology(
        0,
        2,
        &[("a", &["r1"]), ("b", &["r2"]), ("c", &["r3"])],
        &[("a", "b")],
    );
    assert!(!validate(&partitioned).is_empty());

    let out_of_bounds = build_topology(
        2,
        2,
        &[("a", &["r1"]), ("b", &["r2"])],
        &[("a", "b")],
    );
    assert!(!validate(&out_of_bounds).is_empty());

    let uncovered = build_topology(1, 1, &[("a", &["r1"]), ("b", &[])], &[("a", "b")]);
    assert!(!validate(&uncovered).is_empty());

    let looped = build_topology(
        1,
        3,
        &[("a", &["r1"]), ("b", &["r2"])],
        &[("a", "b"), ("b", "b")],
    );
    assert!(!validate(&looped).is_empty());
}
