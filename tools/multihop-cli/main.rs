use clap::Parser;
use multihop::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::filter::LevelFilter;

/// Compiles a multi-hop flow request against a topology manifest and prints the plan
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the topology manifest JSON file
    topology_path: String,
    /// Path to the flow request JSON file
    flow_path: String,

    /// Optional compiler configuration (policy, timeouts) as a flat JSON object
    #[arg(short, long)]
    config: Option<String>,

    /// Optional template manifest to seed the template catalog with
    #[arg(short, long)]
    templates: Option<String>,

    /// Explicit hop path overriding the one in the flow file, e.g. "A,B,D"
    #[arg(short, long)]
    path: Option<String>,

    /// Print the plan as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log routing decisions at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to start runtime: {}", e)));

    runtime.block_on(run(cli));
}

async fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Manifest Loading ---
    let load_start = Instant::now();
    let config = match &cli.config {
        Some(path) => FlowConfig::from_file(path).unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => FlowConfig::new(),
    };
    let topologies = TopologyManifest::from_file(&cli.topology_path)
        .and_then(TopologyManifest::into_topology_specs)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let catalog = cli.templates.as_ref().map(|path| {
        TemplateManifest::from_file(path)
            .map(TemplateManifest::into_catalog)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()))
    });

    let mut flow = FlowManifest::from_file(&cli.flow_path)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()))
        .into_flow_spec()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert flow: {}", e)));
    if let Some(path) = &cli.path {
        flow = flow.with_explicit_path(path);
    }
    let load_duration = load_start.elapsed();

    // --- 2. Compiler Construction ---
    println!(
        "\nLoaded {} topologies for flow '{}'",
        topologies.len(),
        flow.uri()
    );
    let mut builder = Compiler::builder(config);
    for spec in topologies {
        builder = builder.with_topology(spec);
    }
    if let Some(catalog) = catalog {
        builder = builder.with_template_catalog(Arc::new(catalog));
    }
    let compiler = builder
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid policy configuration: {}", e)));
    println!("Routing policy: {}", compiler.policy().name());

    // --- 3. Compilation ---
    let compile_start = Instant::now();
    let plan = compiler
        .compile(&flow)
        .await
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let compile_duration = compile_start.elapsed();

    // --- 4. Results ---
    if cli.json {
        let json = serde_json::to_string_pretty(&plan)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize plan: {}", e)));
        println!("{}", json);
    } else {
        println!("\nCompilation Successful! {} hops:", plan.len());
        for (i, step) in plan.steps().iter().enumerate() {
            let template = step.work_unit.template_uri().unwrap_or("-");
            println!(
                "  {}. {} -> {} on {} (weight {}, template {})",
                i + 1,
                step.source,
                step.target,
                step.engine,
                step.weight,
                template
            );
            println!("     work unit: {}", step.work_unit.uri());
        }
        println!("  -> Route: {}", plan.route().join(" -> "));
        println!("  -> Total weight: {}", plan.total_weight());
    }

    if let Some(graph) = compiler.last_graph() {
        println!("\n--- Graph Summary ---");
        println!("Nodes: {}", graph.node_count());
        println!("Edges: {}", graph.edge_count());
    }

    println!("\n--- Performance Summary ---");
    println!("Manifest Loading:     {:?}", load_duration);
    println!("Compilation:          {:?}", compile_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_start.elapsed());
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
