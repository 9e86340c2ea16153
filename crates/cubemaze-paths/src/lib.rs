//! Traced graph searches over a cubemaze [`GridGraph`](cubemaze_core::GridGraph).
//!
//! This crate runs the classic shortest-path searches from the grid's start
//! cell to its end cell and records every expansion for later playback:
//!
//! - **BFS** by hop count ([`Solver::bfs`])
//! - **Dijkstra** by edge weight ([`Solver::dijkstra`])
//! - **A\*** by edge weight plus a distance estimate ([`Solver::astar`])
//!
//! Each search returns a [`Trace`]: the ordered [`Step`]s and the path from
//! start to end (empty when the end cannot be reached). Searches write
//! `visited`, `distance`, `heuristic` and `parent` on the graph's cells and
//! reset them first, so the same maze can be solved again with another
//! algorithm.

mod astar;
mod bfs;
mod dijkstra;
mod heuristic;
mod solver;
mod trace;

pub use heuristic::{Heuristic, euclidean};
pub use solver::{
    Algorithm, ParseNameError, SearchOptions, Solver, run_astar, run_bfs, run_dijkstra,
};
pub use trace::{Relaxed, Step, Trace};
