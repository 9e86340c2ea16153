//! Carve a 3D maze and solve it with BFS, Dijkstra and A*.
//!
//! Run: cargo run --bin cubemaze -- --size 8 --seed 42 --layers

use std::path::PathBuf;

use clap::Parser;
use cubemaze_core::Dims;
use cubemaze_demos::{DemoConfig, load_config, render_layers, run, summary_line, traces_json};
use cubemaze_paths::{Algorithm, Heuristic};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; the flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Edge length of a cubic grid
    #[arg(short = 'n', long, conflicts_with_all = ["width", "height", "depth"])]
    size: Option<i32>,

    #[arg(short = 'W', long)]
    width: Option<i32>,

    #[arg(short = 'H', long)]
    height: Option<i32>,

    #[arg(short = 'D', long)]
    depth: Option<i32>,

    /// World-space size of one cell (scales the Euclidean heuristic)
    #[arg(long)]
    cell_size: Option<f64>,

    /// Seed for weights and carving
    #[arg(short, long)]
    seed: Option<u64>,

    /// Searches to run, comma separated (bfs, dijkstra, astar)
    #[arg(short, long, value_delimiter = ',')]
    algorithm: Vec<Algorithm>,

    /// A* estimate (euclidean, admissible, zero)
    #[arg(long)]
    heuristic: Option<Heuristic>,

    /// Stop Dijkstra and A* once the end is settled
    #[arg(long)]
    stop_at_end: bool,

    /// Open every wall instead of carving a maze
    #[arg(long)]
    open: bool,

    /// Print the finished playback layer by layer
    #[arg(long)]
    layers: bool,

    /// Print the traces as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> Result<DemoConfig, Box<dyn std::error::Error>> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => DemoConfig::default(),
        };
        let dims = &mut cfg.grid.dims;
        if let Some(n) = self.size {
            *dims = Dims::cube(n);
        }
        dims.width = self.width.unwrap_or(dims.width);
        dims.height = self.height.unwrap_or(dims.height);
        dims.depth = self.depth.unwrap_or(dims.depth);
        if let Some(size) = self.cell_size {
            cfg.grid.cell_size = size;
        }
        if self.seed.is_some() {
            cfg.grid.seed = self.seed;
        }
        if !self.algorithm.is_empty() {
            cfg.algorithms = self.algorithm.clone();
        }
        if let Some(h) = self.heuristic {
            cfg.search.heuristic = h;
        }
        cfg.search.stop_at_end |= self.stop_at_end;
        cfg.carve &= !self.open;
        Ok(cfg)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = try_main(Args::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn try_main(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = args.config()?;
    let report = run(&cfg)?;

    if args.json {
        println!("{}", traces_json(&report)?);
        return Ok(());
    }

    println!("{} maze, seed {}", report.graph.dims(), report.seed);
    for trace in &report.traces {
        println!("{}", summary_line(trace, &report.graph));
    }
    if args.layers {
        for trace in &report.traces {
            println!("\n[{}]", trace.algorithm);
            print!("{}", render_layers(&report.graph, trace));
        }
    }
    Ok(())
}
