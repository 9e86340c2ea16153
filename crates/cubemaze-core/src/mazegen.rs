//! Maze carving.
//!
//! [`MazeGen`] carves one-cell-wide passages through a walled
//! [`GridGraph`] with a randomized depth-first backtracker that starts at
//! the start cell.

use std::collections::VecDeque;

use rand::{Rng, RngExt};

use crate::cell::Role;
use crate::graph::GridGraph;

/// Depth-first maze carver.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    /// Stop as soon as the carved region touches the end cell.
    pub stop_at_end: bool,
}

impl<R: Rng> MazeGen<R> {
    /// Create a carver that stops once the end is connected.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            stop_at_end: true,
        }
    }

    /// Carve passages into `graph`, returning the number of cells opened.
    ///
    /// The graph is [`clear`](GridGraph::clear)ed first, so carving twice
    /// regenerates rather than accumulates. A wall is opened only while it
    /// has at most one carved neighbour, which keeps passages from merging
    /// into open rooms. The end cell is joined to the maze the first time
    /// the walk steps next to it; if the walk never gets there, a
    /// tunnel is dug from the end to the nearest carved cell.
    pub fn carve(&mut self, graph: &mut GridGraph) -> usize {
        graph.clear();

        let start = graph.start();
        let end = graph.end();
        let mut seen = vec![false; graph.len()];
        let mut stack = vec![start];
        let mut candidates = Vec::with_capacity(6);
        let mut carved = 0usize;
        let mut reached_end = false;
        seen[start] = true;

        while let Some(&ci) = stack.last() {
            candidates.clear();
            for e in graph.neighbors(ci) {
                if seen[e.to] {
                    continue;
                }
                if e.to == end
                    || (graph.cell(e.to).role() == Role::Wall && carved_neighbors(graph, e.to) <= 1)
                {
                    candidates.push(e.to);
                }
            }

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let ni = candidates[self.rng.random_range(0..candidates.len())];
            seen[ni] = true;
            if ni == end {
                reached_end = true;
                if self.stop_at_end {
                    break;
                }
                continue;
            }

            graph.set_role_at(ni, Role::Open);
            carved += 1;
            stack.push(ni);
        }

        if !reached_end {
            let tunnel = connect_end(graph);
            log::debug!("end not reached by the walk, dug a {tunnel}-cell tunnel");
            carved += tunnel;
        }

        log::debug!("carved {carved} of {} cells", graph.len());
        carved
    }
}

/// Open the walls on a shortest lattice route from the end to the nearest
/// carved cell. Returns the number of walls opened.
fn connect_end(graph: &mut GridGraph) -> usize {
    let end = graph.end();
    let mut parent = vec![usize::MAX; graph.len()];
    let mut queue = VecDeque::from([end]);
    parent[end] = end;

    let mut hit = None;
    while let Some(ci) = queue.pop_front() {
        if matches!(graph.cell(ci).role(), Role::Open | Role::Start) {
            hit = Some(ci);
            break;
        }
        for e in graph.neighbors(ci) {
            if parent[e.to] == usize::MAX {
                parent[e.to] = ci;
                queue.push_back(e.to);
            }
        }
    }

    let Some(mut ci) = hit else {
        return 0;
    };
    let mut opened = 0;
    while ci != end {
        if graph.cell(ci).role() == Role::Wall {
            graph.set_role_at(ci, Role::Open);
            opened += 1;
        }
        ci = parent[ci];
    }
    opened
}

/// Carved neighbours of `idx`: open cells and the start. The end is left
/// out so that cells next to it stay carvable.
fn carved_neighbors(graph: &GridGraph, idx: usize) -> usize {
    graph
        .neighbors(idx)
        .iter()
        .filter(|e| matches!(graph.cell(e.to).role(), Role::Open | Role::Start))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Dims;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn graph(n: i32) -> GridGraph {
        GridGraph::build_with_rng(Dims::cube(n), 1.0, &mut StdRng::seed_from_u64(3)).unwrap()
    }

    /// Flood fill over passable cells from the start.
    fn reachable(g: &GridGraph) -> Vec<bool> {
        let mut seen = vec![false; g.len()];
        let mut stack = vec![g.start()];
        seen[g.start()] = true;
        while let Some(ci) = stack.pop() {
            for e in g.neighbors(ci) {
                if !seen[e.to] && g.is_passable(e.to) {
                    seen[e.to] = true;
                    stack.push(e.to);
                }
            }
        }
        seen
    }

    #[test]
    fn carving_connects_end() {
        for seed in 0..20 {
            let mut g = graph(5);
            let mut mg = MazeGen::new(StdRng::seed_from_u64(seed));
            let carved = mg.carve(&mut g);
            assert!(carved > 0);
            assert_eq!(g.count(Role::Open), carved);
            assert!(reachable(&g)[g.end()], "seed {seed}: end not connected");
        }
    }

    #[test]
    fn every_open_cell_is_reachable() {
        let mut g = graph(6);
        let mut mg = MazeGen::new(StdRng::seed_from_u64(11));
        mg.stop_at_end = false;
        mg.carve(&mut g);
        let seen = reachable(&g);
        for (i, c) in g.cells().iter().enumerate() {
            if c.is_passable() {
                assert!(seen[i], "open cell {} is isolated", c.pos());
            }
        }
        assert!(g.count(Role::Wall) > 0);
    }

    #[test]
    fn carving_regenerates() {
        let mut g = graph(4);
        let mut mg = MazeGen::new(StdRng::seed_from_u64(5));
        let first = mg.carve(&mut g);
        let second = mg.carve(&mut g);
        assert_eq!(g.count(Role::Open), second);
        assert!(first > 0 && second > 0);
    }

    #[test]
    fn same_seed_same_maze() {
        let mut a = graph(5);
        let mut b = graph(5);
        MazeGen::new(StdRng::seed_from_u64(8)).carve(&mut a);
        MazeGen::new(StdRng::seed_from_u64(8)).carve(&mut b);
        let roles = |g: &GridGraph| g.cells().iter().map(|c| c.role()).collect::<Vec<_>>();
        assert_eq!(roles(&a), roles(&b));
    }
}
