use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use qpo::{has_property, Graph, LabeledGraph, LabelingSearch, Permutation, SearchConfig, SearchReport};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qpo")]
#[command(about = "Check graphs for QPO labelings", long_about = None)]
struct Cli {
    /// Log search progress (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the graph under a single labeling
    Check {
        #[command(flatten)]
        graph: GraphSource,

        /// New labels for vertices 1..n, comma separated (default: as given)
        #[arg(long, value_delimiter = ',')]
        labeling: Option<Vec<usize>>,
    },
    /// Search every labeling of the graph's structure
    Search {
        #[command(flatten)]
        graph: GraphSource,

        /// Stop at the first labeling with the property
        #[arg(long, default_value_t = false)]
        stop_at_success: bool,

        /// Stop at the first labeling without the property
        #[arg(long, default_value_t = false)]
        stop_at_failure: bool,

        /// Count the labelings with the property
        #[arg(long, default_value_t = false)]
        count: bool,

        /// Check labelings on all cores (needs the `parallel` feature)
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
}

#[derive(Args)]
struct GraphSource {
    /// A named graph family
    #[arg(long, value_enum, conflicts_with = "file", required_unless_present = "file")]
    family: Option<Family>,

    /// Vertex count for complete, cycle and path graphs
    #[arg(long, default_value_t = 4)]
    order: usize,

    /// Left side of a complete bipartite graph
    #[arg(long, default_value_t = 2)]
    left: usize,

    /// Right side of a complete bipartite graph
    #[arg(long, default_value_t = 2)]
    right: usize,

    /// JSON adjacency lists, e.g. {"1": [2, 3], "2": [4]}
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Family {
    Complete,
    Cycle,
    Path,
    Bipartite,
}

impl GraphSource {
    fn load(&self) -> Result<LabeledGraph> {
        if let Some(path) = &self.file {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let lists: BTreeMap<usize, Vec<usize>> = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse adjacency lists in {}", path.display()))?;
            return LabeledGraph::from_adjacency(lists)
                .with_context(|| format!("Invalid graph in {}", path.display()));
        }

        Ok(match self.family {
            Some(Family::Complete) => LabeledGraph::complete(self.order),
            Some(Family::Cycle) => LabeledGraph::cycle(self.order),
            Some(Family::Path) => LabeledGraph::path(self.order),
            Some(Family::Bipartite) => LabeledGraph::complete_bipartite(self.left, self.right),
            None => bail!("either --family or --file is required"),
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { graph, labeling } => check(&graph.load()?, labeling, cli.json),
        Commands::Search {
            graph,
            stop_at_success,
            stop_at_failure,
            count,
            parallel,
        } => {
            let config = SearchConfig::exhaustive()
                .stop_at_first_success(stop_at_success)
                .stop_at_first_failure(stop_at_failure)
                .count_successes(count);
            search(&graph.load()?, config, parallel, cli.json)
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "qpo=debug" } else { "qpo=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn check(graph: &LabeledGraph, labels: Option<Vec<usize>>, json: bool) -> Result<()> {
    let graph = match labels {
        Some(labels) => {
            let ranks = labels
                .iter()
                .map(|&label| label.checked_sub(1).context("labels start at 1"))
                .collect::<Result<Vec<_>>>()?;
            let labeling = Permutation::new(ranks).context("Invalid --labeling")?;
            graph.relabel(&labeling).context("Failed to apply --labeling")?
        }
        None => graph.clone(),
    };

    let verdict = has_property(&graph);
    if json {
        let out = serde_json::json!({
            "graph": graph.to_adjacency(),
            "result": verdict,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let stats = graph.statistics();
    println!("Graph: {} vertices, {} edges", stats.vertex_count, stats.edge_count);
    println!("Edges: {:?}", graph.edges());
    println!("has QPO: {}", verdict.holds());
    if let Some(path) = verdict.witness() {
        println!("failed path: {path}");
    }
    Ok(())
}

fn search(structure: &LabeledGraph, config: SearchConfig, parallel: bool, json: bool) -> Result<()> {
    let search = LabelingSearch::new(structure, config);
    // n! overflows for large structures; an early-exit search can still finish.
    let space = search.search_space().ok();

    let start = Instant::now();
    let report = if parallel { run_parallel(&search)? } else { search.run()? };
    let elapsed = start.elapsed();

    if json {
        let out = serde_json::json!({
            "graph": structure.to_adjacency(),
            "config": config,
            "report": report,
            "elapsed_ms": elapsed.as_secs_f64() * 1e3,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_report(&report, space, elapsed);
    Ok(())
}

#[cfg(feature = "parallel")]
fn run_parallel(search: &LabelingSearch<'_, LabeledGraph>) -> Result<SearchReport> {
    Ok(search.run_parallel()?)
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(_search: &LabelingSearch<'_, LabeledGraph>) -> Result<SearchReport> {
    bail!("--parallel requires building with `--features parallel`")
}

fn print_report(report: &SearchReport, space: Option<usize>, elapsed: Duration) {
    println!("has QPO: {}", report.achievable);
    println!(
        "labelings examined: {} of {}",
        report.examined,
        describe_space(space, report.order)
    );
    if let Some(count) = report.success_count {
        println!("number of QPO labelings: {count}");
    }
    if let Some(labeling) = &report.first_success {
        println!("first QPO labeling: {labeling}");
    }
    if let Some(failure) = &report.first_failure {
        println!(
            "first non-QPO labeling: {} (failed path: {})",
            failure.labeling, failure.witness
        );
    }
    println!("total time: {elapsed:.2?}");
}

fn describe_space(space: Option<usize>, order: usize) -> String {
    space.map_or_else(|| format!("{order}!"), |count| count.to_string())
}
