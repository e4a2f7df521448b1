use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use peersearch::cache::KnowledgeCache;
use peersearch::config::load_topology_config;
use peersearch::search::{run_search, SearchQuery, SearchResult, Strategy};
use peersearch::topology::{validate, Topology};

/// Search-strategy simulator for resource discovery in unstructured P2P overlays
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON topology file
    #[arg(short, long)]
    config: PathBuf,

    /// Node id to start the search from
    #[arg(short, long)]
    start: String,

    /// Resource id to search for
    #[arg(short, long)]
    resource: String,

    /// Time-to-live hop budget for the search
    #[arg(short, long, default_value_t = 10)]
    ttl: u32,

    /// Strategy to run (flooding, informed_flooding, random_walk,
    /// informed_random_walk); runs all four when omitted
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Seed for the walk strategies' random source, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting PeerSearch simulator");
    info!("Topology file: {:?}", args.config);

    let config = load_topology_config(&args.config)?;
    let topology = Topology::from_config(&config)
        .wrap_err_with(|| format!("Invalid topology in '{}'", args.config.display()))?;

    let violations = validate(&topology);
    if !violations.is_empty() {
        eprintln!("Topology failed validation with {} violation(s):", violations.len());
        for violation in &violations {
            eprintln!("  - {}", violation);
        }
        return Err(eyre!("topology '{}' is not usable", args.config.display()));
    }
    info!("Topology validated: {} nodes", topology.len());

    let mut rng = match args.seed {
        Some(seed) => {
            info!("Using seeded random source (seed = {})", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    // One shared cache so the informed strategies benefit from the
    // knowledge accumulated by earlier runs in this invocation
    let cache = KnowledgeCache::new();

    let strategies: Vec<Strategy> = match args.strategy {
        Some(strategy) => vec![strategy],
        None => Strategy::ALL.to_vec(),
    };

    let mut results = Vec::new();
    for strategy in strategies {
        let query = SearchQuery {
            start: args.start.clone(),
            resource: args.resource.clone(),
            ttl: args.ttl,
            strategy,
        };
        let result = run_search(&topology, Some(&cache), &query, &mut rng)
            .wrap_err_with(|| format!("{} search failed", strategy))?;
        results.push((strategy, result));
    }

    print_results_table(&results);

    info!("Simulation completed successfully");
    Ok(())
}

/// Print a comparison table of search results, one row per strategy.
fn print_results_table(results: &[(Strategy, SearchResult)]) {
    println!();
    println!("{}", "=".repeat(80));
    println!("SEARCH RESULTS");
    println!("{}", "=".repeat(80));
    println!(
        "{:<22} {:<10} {:<10} {:<14} {:<6}",
        "Strategy", "Found", "Messages", "Nodes visited", "Hops"
    );
    println!("{}", "-".repeat(80));

    for (strategy, result) in results {
        println!(
            "{:<22} {:<10} {:<10} {:<14} {:<6}",
            strategy.to_string(),
            if result.found() { "yes" } else { "no" },
            result.messages,
            result.nodes_visited,
            result.hops
        );
    }
    println!("{}", "=".repeat(80));

    println!();
    println!("TRACES");
    println!("{}", "=".repeat(80));
    for (strategy, result) in results {
        println!("{} ({}):", strategy, result.outcome);
        println!("  {}", result.trace.join(" -> "));
    }
    println!("{}", "=".repeat(80));
}
