use clap::Parser;
use multihop::manifest::{CapabilityEntry, TopologyEntry, TopologyManifest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::fs;

/// A CLI tool to generate random layered topologies for the multihop compiler
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_topology.json")]
    output: String,

    /// Number of execution engines (one topology each)
    #[arg(long, default_value_t = 3)]
    engines: usize,

    /// Number of node layers between source and sink
    #[arg(long, default_value_t = 4)]
    layers: usize,

    /// Nodes per layer
    #[arg(long, default_value_t = 3)]
    width: usize,

    /// Probability that an engine can service a given pair of adjacent-layer nodes
    #[arg(long, default_value_t = 0.5)]
    density: f64,

    /// Seed for reproducible topologies
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.engines == 0 || cli.width == 0 {
        eprintln!("Error: --engines and --width must be at least 1");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.density) {
        eprintln!("Error: --density ({}) must be within 0.0 and 1.0", cli.density);
        std::process::exit(1);
    }

    println!(
        "Generating topology ({} engines, {} layers of {} nodes, seed {})...",
        cli.engines, cli.layers, cli.width, cli.seed
    );

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let layers = generate_layers(cli.layers, cli.width);
    let topologies = (0..cli.engines)
        .map(|i| generate_topology(&mut rng, i, &layers, cli.density))
        .collect::<Vec<_>>();

    let edge_count: usize = topologies.iter().map(|t| t.capabilities.len()).sum();
    let manifest = TopologyManifest { topologies };

    let json_output = serde_json::to_string_pretty(&manifest)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} capabilities and saved them to '{}'",
        edge_count, cli.output
    );
    println!("-> Route requests from 'source' to 'sink'.");

    Ok(())
}

/// `source`, then `layers` rows of `width` nodes, then `sink`.
fn generate_layers(layers: usize, width: usize) -> Vec<Vec<String>> {
    let mut rows = vec![vec!["source".to_string()]];
    for layer in 0..layers {
        rows.push((0..width).map(|i| format!("L{}N{}", layer, i)).collect());
    }
    rows.push(vec!["sink".to_string()]);
    rows
}

fn generate_topology(
    rng: &mut StdRng,
    index: usize,
    layers: &[Vec<String>],
    density: f64,
) -> TopologyEntry {
    let mut capabilities = Vec::new();
    for pair in layers.windows(2) {
        for source in &pair[0] {
            for target in &pair[1] {
                if rng.random_bool(density) {
                    capabilities.push(CapabilityEntry {
                        source: source.clone(),
                        target: target.clone(),
                        weight: Some((rng.random_range(1.0..10.0_f64) * 10.0).round() / 10.0),
                        properties: BTreeMap::new(),
                    });
                }
            }
        }
    }
    println!(
        "-> Engine {} advertises {} capabilities.",
        index,
        capabilities.len()
    );

    TopologyEntry {
        uri: format!("topology/engine-{}", index),
        description: format!("Generated engine {}", index),
        engine: format!("engine://cluster-{}:8443", index),
        capabilities,
    }
}
