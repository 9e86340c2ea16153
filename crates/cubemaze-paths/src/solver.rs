use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::str::FromStr;

use cubemaze_core::{Edge, GridGraph};

use crate::heuristic::Heuristic;
use crate::trace::Trace;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The searches a [`Solver`] can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    Bfs,
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::AStar];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Algorithm::Bfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            _ => Err(ParseNameError::new("algorithm", s)),
        }
    }
}

/// Error returned when parsing an [`Algorithm`] or [`Heuristic`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    kind: &'static str,
    input: String,
}

impl ParseNameError {
    pub(crate) fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.input)
    }
}

impl std::error::Error for ParseNameError {}

// ---------------------------------------------------------------------------
// SearchOptions
// ---------------------------------------------------------------------------

/// Knobs shared by the weighted searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    /// Stop Dijkstra / A* right after the end cell is finalized instead of
    /// exhausting the frontier. BFS always stops at the end.
    pub stop_at_end: bool,
    /// Estimate used by A*.
    pub heuristic: Heuristic,
}

// ---------------------------------------------------------------------------
// Internal priority-queue entry
// ---------------------------------------------------------------------------

/// Heap entry ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// priority first, and the lowest arena index among equal priorities.
///
/// `g` is the cell's distance when the entry was pushed; an entry whose `g`
/// no longer matches the cell is stale.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) g: u32,
    pub(crate) f: f64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Runs searches over a [`GridGraph`] and returns their [`Trace`]s.
///
/// `Solver` keeps its frontier buffers between runs so repeated searches
/// do not regrow them after warm-up; only the per-step neighbour lists
/// handed out in the [`Trace`] are allocated fresh. Every run starts by resetting the
/// graph's search state, so running twice on the same maze gives the same
/// trace.
#[derive(Debug, Default)]
pub struct Solver {
    pub(crate) options: SearchOptions,
    pub(crate) queue: VecDeque<usize>,
    pub(crate) open: BinaryHeap<NodeRef>,
    // scratch copy of the current cell's edges
    pub(crate) nbuf: Vec<Edge>,
}

impl Solver {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            queue: VecDeque::new(),
            open: BinaryHeap::new(),
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Run `algorithm` on `graph`.
    pub fn run(&mut self, algorithm: Algorithm, graph: &mut GridGraph) -> Trace {
        match algorithm {
            Algorithm::Bfs => self.bfs(graph),
            Algorithm::Dijkstra => self.dijkstra(graph),
            Algorithm::AStar => self.astar(graph),
        }
    }
}

/// Breadth-first search with default options.
pub fn run_bfs(graph: &mut GridGraph) -> Trace {
    Solver::default().bfs(graph)
}

/// Exhaustive Dijkstra with default options.
pub fn run_dijkstra(graph: &mut GridGraph) -> Trace {
    Solver::default().dijkstra(graph)
}

/// Exhaustive A* with the default (Euclidean) heuristic.
pub fn run_astar(graph: &mut GridGraph) -> Trace {
    Solver::default().astar(graph)
}
