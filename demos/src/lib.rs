//! Shared pieces of the `cubemaze` command-line demo: configuration
//! loading, running the searches and turning the results into text.

use std::fmt;
use std::path::Path;

use cubemaze_core::{GridConfig, GridError, GridGraph, MazeGen};
use cubemaze_paths::{Algorithm, SearchOptions, Solver, Trace};
use cubemaze_playback::Playback;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::{Deserialize, Serialize};

/// Everything one demo run needs. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub grid: GridConfig,
    pub search: SearchOptions,
    /// Searches to run, in order. Empty means all of them.
    pub algorithms: Vec<Algorithm>,
    /// Carve a maze before searching. When off, every wall is opened.
    pub carve: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            search: SearchOptions::default(),
            algorithms: Vec::new(),
            carve: true,
        }
    }
}

impl DemoConfig {
    /// The algorithms to run, expanding an empty list to all of them.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        if self.algorithms.is_empty() {
            Algorithm::ALL.to_vec()
        } else {
            self.algorithms.clone()
        }
    }
}

#[derive(Debug)]
pub enum DemoError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Grid(GridError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read config: {e}"),
            Self::Json(e) => write!(f, "bad config: {e}"),
            Self::Grid(e) => write!(f, "cannot build grid: {e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Grid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for DemoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<GridError> for DemoError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

pub fn load_config(path: &Path) -> Result<DemoConfig, DemoError> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}

pub fn parse_config(text: &str) -> Result<DemoConfig, DemoError> {
    Ok(serde_json::from_str(text)?)
}

/// Why an A* run on this config may not find the cheapest path, if it can
/// happen: the estimate overestimates once cells are larger than the
/// smallest edge weight.
pub fn heuristic_warning(config: &DemoConfig) -> Option<String> {
    let heuristic = config.search.heuristic;
    let cell_size = config.grid.cell_size;
    if !config.algorithms().contains(&Algorithm::AStar) || heuristic.is_admissible(cell_size) {
        return None;
    }
    Some(format!(
        "{heuristic} heuristic overestimates with cell size {cell_size}; \
         astar may return a costlier path than dijkstra (try --heuristic admissible)"
    ))
}

/// Result of one demo run. `graph` holds the maze the traces were taken on.
#[derive(Debug)]
pub struct Report {
    pub seed: u64,
    pub graph: GridGraph,
    pub traces: Vec<Trace>,
}

/// Build the grid, carve it and run every configured search on it.
///
/// Without a seed in the config one is drawn and logged, so any run can be
/// reproduced.
pub fn run(config: &DemoConfig) -> Result<Report, DemoError> {
    let seed = config.grid.seed.unwrap_or_else(|| rand::rng().random());
    log::info!(
        "building {} grid (cell size {}) with seed {seed}",
        config.grid.dims,
        config.grid.cell_size
    );

    if let Some(warning) = heuristic_warning(config) {
        log::warn!("{warning}");
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = GridGraph::build_with_rng(config.grid.dims, config.grid.cell_size, &mut rng)?;
    if config.carve {
        let carved = MazeGen::new(rng).carve(&mut graph);
        log::info!("carved {carved} of {} cells", graph.len());
    } else {
        graph.open_all();
    }

    let mut solver = Solver::new(config.search);
    let traces = config
        .algorithms()
        .into_iter()
        .map(|alg| solver.run(alg, &mut graph))
        .collect();
    Ok(Report {
        seed,
        graph,
        traces,
    })
}

/// One line per trace: steps taken, then the path length and cost.
pub fn summary_line(trace: &Trace, graph: &GridGraph) -> String {
    let head = format!("{:<9}{:>7} steps", trace.algorithm.name(), trace.steps.len());
    match trace.path_cost(graph) {
        Some(cost) => format!("{head}{:>6} hops  cost {cost}", trace.hop_count()),
        None => format!("{head}  no path found"),
    }
}

/// The finished playback of `trace`, drawn one horizontal layer at a time
/// from the bottom up.
pub fn render_layers(graph: &GridGraph, trace: &Trace) -> String {
    let mut playback = Playback::new(graph, trace.clone());
    playback.set_frame(playback.total_frames());

    let mut out = String::new();
    for y in 0..graph.dims().height {
        out.push_str(&format!("y={y}\n"));
        for row in playback.layer(y) {
            out.push_str("  ");
            out.push_str(&row);
            out.push('\n');
        }
    }
    out
}

pub fn traces_json(report: &Report) -> Result<String, DemoError> {
    Ok(serde_json::to_string_pretty(&report.traces)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubemaze_core::Dims;
    use cubemaze_paths::Heuristic;

    fn seeded(n: i32, seed: u64) -> DemoConfig {
        DemoConfig {
            grid: GridConfig {
                dims: Dims::cube(n),
                cell_size: 1.0,
                seed: Some(seed),
            },
            ..DemoConfig::default()
        }
    }

    #[test]
    fn partial_config() {
        let cfg = parse_config(
            r#"{"grid": {"dims": {"width": 4, "height": 3, "depth": 2}},
                "search": {"heuristic": "admissible"},
                "algorithms": ["astar"]}"#,
        )
        .unwrap();
        assert_eq!(cfg.grid.dims, Dims::new(4, 3, 2));
        assert_eq!(cfg.grid.cell_size, 1.0);
        assert_eq!(cfg.search.heuristic, Heuristic::Admissible);
        assert!(!cfg.search.stop_at_end);
        assert_eq!(cfg.algorithms(), vec![Algorithm::AStar]);
        assert!(cfg.carve);

        let empty = parse_config("{}").unwrap();
        assert_eq!(empty, DemoConfig::default());
        assert_eq!(empty.algorithms(), Algorithm::ALL.to_vec());
    }

    #[test]
    fn bad_config() {
        assert!(matches!(
            parse_config(r#"{"algorithms": ["dfs"]}"#),
            Err(DemoError::Json(_))
        ));
        let missing = load_config(Path::new("/nonexistent/cubemaze.json")).unwrap_err();
        assert!(matches!(missing, DemoError::Io(_)));
    }

    #[test]
    fn invalid_grid_is_reported() {
        let mut cfg = seeded(1, 0);
        cfg.grid.dims = Dims::cube(1);
        assert!(matches!(
            run(&cfg),
            Err(DemoError::Grid(GridError::DegenerateGrid(_)))
        ));
    }

    #[test]
    fn seeded_runs_repeat() {
        let cfg = seeded(5, 17);
        let a = run(&cfg).unwrap();
        let b = run(&cfg).unwrap();
        assert_eq!(a.seed, 17);
        assert_eq!(a.traces, b.traces);
        assert_eq!(a.traces.len(), 3);
        assert!(a.traces.iter().all(Trace::is_found));
    }

    #[test]
    fn open_grid_summary() {
        let mut cfg = seeded(3, 1);
        cfg.carve = false;
        cfg.algorithms = vec![Algorithm::Bfs];
        let report = run(&cfg).unwrap();
        let trace = &report.traces[0];
        // Far corner of a 3-cube is six moves away.
        assert_eq!(trace.hop_count(), 6);
        let line = summary_line(trace, &report.graph);
        assert!(line.starts_with("bfs"));
        assert!(line.contains("6 hops"));
    }

    #[test]
    fn layers_show_endpoints() {
        let report = run(&seeded(3, 5)).unwrap();
        let text = render_layers(&report.graph, &report.traces[0]);
        let lines: Vec<&str> = text.lines().collect();
        // A header plus three rows for each of three layers.
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "y=0");
        assert!(lines[1].starts_with("  S"));
        assert!(lines[11].ends_with('E'));
    }

    #[test]
    fn warns_about_overestimating_heuristic() {
        let mut cfg = seeded(3, 2);
        assert_eq!(heuristic_warning(&cfg), None);

        cfg.grid.cell_size = 4.0;
        let warning = heuristic_warning(&cfg).unwrap();
        assert!(warning.contains("euclidean"));
        assert!(warning.contains("cell size 4"));

        cfg.search.heuristic = Heuristic::Admissible;
        assert_eq!(heuristic_warning(&cfg), None);

        cfg.search.heuristic = Heuristic::Euclidean;
        cfg.algorithms = vec![Algorithm::Bfs, Algorithm::Dijkstra];
        assert_eq!(heuristic_warning(&cfg), None);
    }

    #[test]
    fn traces_serialize() {
        let report = run(&seeded(3, 8)).unwrap();
        let json = traces_json(&report).unwrap();
        let back: Vec<Trace> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report.traces);
        assert!(json.contains("\"dijkstra\""));
    }
}
