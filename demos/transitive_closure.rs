//! End-to-end demo: load or generate a directed graph, compute its
//! transitive closure with the selected strategy, optionally print the
//! result and cross-verify both strategies.
//!
//! ```bash
//! # Closure of a matrix file, sequential strategy, printed:
//! cargo run --example transitive_closure -- --input graph.txt --sequential --print
//!
//! # Seeded synthetic graph on a 4-thread pool, cross-checking strategies:
//! cargo run --example transitive_closure -- --vertices 256 --edges 2000 --threads 4 --verify
//! ```
//!
//! Exits with code 1 on any input-validation failure.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use reach::{
    generate_simple_digraph, transitive_closure, transitive_closure_parallel, verify_equivalent,
    AdjacencyMatrix, GraphConfig,
};

/// Transitive closure of a directed graph
#[derive(Parser)]
#[command(name = "transitive_closure")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Adjacency matrix file (`rows columns` header, then row-major cells);
    /// a synthetic graph is generated when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Vertex count for the synthetic graph
    #[arg(long, default_value_t = 64)]
    vertices: usize,

    /// Edge count for the synthetic graph
    #[arg(long, default_value_t = 256)]
    edges: usize,

    /// Seed for the synthetic graph
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Use the sequential strategy instead of the data-parallel one
    #[arg(short, long)]
    sequential: bool,

    /// Worker threads for the data-parallel strategy (0 = rayon's default)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Pretty-print the closure matrix
    #[arg(short, long)]
    print: bool,

    /// Run both strategies and compare them cell by cell
    #[arg(long)]
    verify: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> reach::Result<()> {
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .expect("rayon pool must be configured before first use");
    }

    let load_start = Instant::now();
    let adjacency = match &cli.input {
        Some(path) => {
            info!("loading adjacency matrix from {}", path.display());
            AdjacencyMatrix::from_path(path)?
        }
        None => {
            info!(
                "generating simple digraph (vertices={}, edges={}, seed={})",
                cli.vertices, cli.edges, cli.seed
            );
            generate_simple_digraph(GraphConfig {
                vertices: cli.vertices,
                edges: cli.edges,
                seed: cli.seed,
            })?
        }
    };
    info!(
        "{}x{} matrix with {} edges ready in {:.2?}",
        adjacency.dim(),
        adjacency.dim(),
        adjacency.edge_count(),
        load_start.elapsed()
    );

    let strategy = if cli.sequential { "sequential" } else { "parallel" };
    let compute_start = Instant::now();
    let closed = if cli.sequential {
        transitive_closure(&adjacency)
    } else {
        transitive_closure_parallel(&adjacency)
    };
    info!(
        "{strategy} closure of {} vertices computed in {:.2?} ({} reachable pairs)",
        closed.dim(),
        compute_start.elapsed(),
        closed.edge_count()
    );

    if cli.verify {
        let other_start = Instant::now();
        let other = if cli.sequential {
            transitive_closure_parallel(&adjacency)
        } else {
            transitive_closure(&adjacency)
        };
        verify_equivalent(&closed, &other)?;
        info!(
            "strategies agree on all {} cells (cross-check took {:.2?})",
            closed.dim() * closed.dim(),
            other_start.elapsed()
        );
    }

    if cli.print {
        print!("{closed}");
    }

    Ok(())
}
