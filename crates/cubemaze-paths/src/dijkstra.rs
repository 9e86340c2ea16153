use cubemaze_core::{Cell, GridGraph};

use crate::Solver;
use crate::heuristic::Heuristic;
use crate::solver::{Algorithm, NodeRef};
use crate::trace::{Recorder, Relaxed, Step, Trace};

impl Solver {
    /// Dijkstra's algorithm from the start.
    ///
    /// The unfinalized cell with the smallest distance is expanded next,
    /// ties going to the cell first in scan order. Each expansion records the
    /// neighbours whose distance it lowered. Unless
    /// [`SearchOptions::stop_at_end`](crate::SearchOptions::stop_at_end) is
    /// set, the search runs until every reachable cell is finalized, leaving
    /// each with its minimum distance from the start.
    pub fn dijkstra(&mut self, graph: &mut GridGraph) -> Trace {
        self.best_first(graph, Algorithm::Dijkstra, None)
    }

    /// Shared loop for Dijkstra and A*. With a heuristic, a cell's priority
    /// is `distance + heuristic`; without one it is just `distance`.
    pub(crate) fn best_first(
        &mut self,
        graph: &mut GridGraph,
        algorithm: Algorithm,
        heuristic: Option<Heuristic>,
    ) -> Trace {
        graph.reset();
        let mut rec = Recorder::new(algorithm);

        let start = graph.start();
        let end = graph.end();
        if let Some(h) = heuristic {
            let est = h.estimate(graph, start);
            graph.cell_mut(start).heuristic = est;
        }

        self.open.clear();
        let s = graph.cell(start);
        self.open.push(NodeRef {
            idx: start,
            g: s.distance,
            f: priority(s, heuristic.is_some()),
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = self.open.pop() {
            let ci = current.idx;
            let cell = graph.cell(ci);
            // Skip finalized cells and entries superseded by a later relaxation.
            if cell.visited || cell.distance != current.g {
                continue;
            }
            let current_dist = cell.distance;
            let cp = cell.pos();
            graph.cell_mut(ci).visited = true;

            nbuf.clear();
            nbuf.extend_from_slice(graph.neighbors(ci));

            let mut relaxed = Vec::with_capacity(nbuf.len());
            for e in nbuf.iter() {
                let n = graph.cell(e.to);
                if !n.is_passable() || n.visited {
                    continue;
                }
                let tentative = current_dist.saturating_add(e.weight);
                if tentative >= n.distance {
                    continue;
                }
                let est = heuristic.map(|h| h.estimate(graph, e.to));

                let n = graph.cell_mut(e.to);
                n.distance = tentative;
                n.parent = Some(ci);
                if let Some(est) = est {
                    n.heuristic = est;
                }
                self.open.push(NodeRef {
                    idx: e.to,
                    g: tentative,
                    f: priority(n, heuristic.is_some()),
                });
                relaxed.push(Relaxed {
                    cell: n.pos(),
                    weight: e.weight,
                });
            }

            rec.push(Step {
                cell: cp,
                neighbors: relaxed,
            });

            if ci == end && self.options.stop_at_end {
                break;
            }
        }

        self.nbuf = nbuf;
        rec.finish(graph)
    }
}

#[inline]
fn priority(cell: &Cell, with_heuristic: bool) -> f64 {
    if with_heuristic {
        f64::from(cell.distance) + cell.heuristic
    } else {
        f64::from(cell.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SearchOptions, run_dijkstra};
    use cubemaze_core::{Dims, Point3, Role, UNREACHABLE};
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn porous(n: i32, seed: u64, open_pct: f64) -> GridGraph {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut g = GridGraph::build_with_rng(Dims::cube(n), 1.0, &mut rng).unwrap();
        for p in g.bounds() {
            if !g.cell_at(p).unwrap().role().is_fixed() && rng.random_bool(open_pct) {
                g.set_role(p, Role::Open).unwrap();
            }
        }
        g
    }

    /// Bellman-Ford over passable cells.
    fn reference_distances(g: &GridGraph) -> Vec<u32> {
        let mut d = vec![UNREACHABLE; g.len()];
        d[g.start()] = 0;
        for _ in 0..g.len() {
            let mut changed = false;
            for i in 0..g.len() {
                if d[i] == UNREACHABLE || !g.is_passable(i) {
                    continue;
                }
                for e in g.neighbors(i) {
                    if g.is_passable(e.to) && d[i] + e.weight < d[e.to] {
                        d[e.to] = d[i] + e.weight;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        d
    }

    #[test]
    fn matches_bellman_ford_on_open_cube() {
        let mut g = GridGraph::build_with_rng(Dims::cube(3), 1.0, &mut StdRng::seed_from_u64(1))
            .unwrap();
        g.open_all();
        let reference = reference_distances(&g);
        let trace = run_dijkstra(&mut g);
        for (i, c) in g.cells().iter().enumerate() {
            assert_eq!(c.distance, reference[i], "cell {}", c.pos());
            assert!(c.visited);
        }
        assert_eq!(trace.steps.len(), 27);
        assert_eq!(trace.path_cost(&g), Some(reference[g.end()]));
    }

    #[test]
    fn matches_bellman_ford_with_walls() {
        for seed in 0..25 {
            let mut g = porous(3, seed, 0.55);
            let reference = reference_distances(&g);
            let trace = run_dijkstra(&mut g);
            for (i, c) in g.cells().iter().enumerate() {
                assert_eq!(c.distance, reference[i], "seed {seed} cell {}", c.pos());
            }
            match reference[g.end()] {
                UNREACHABLE => assert!(!trace.is_found()),
                want => assert_eq!(trace.path_cost(&g), Some(want)),
            }
        }
    }

    #[test]
    fn expansion_order_is_nondecreasing() {
        let mut g = porous(4, 7, 0.7);
        let trace = run_dijkstra(&mut g);
        let dists: Vec<u32> = trace
            .visited()
            .map(|p| g.cell_at(p).unwrap().distance)
            .collect();
        assert!(dists.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn ties_go_to_scan_order() {
        let mut g = GridGraph::build_with_rng(Dims::cube(2), 1.0, &mut StdRng::seed_from_u64(0))
            .unwrap();
        g.open_all();
        let trace = run_dijkstra(&mut g);
        let seen: Vec<Point3> = trace.visited().collect();
        for w in seen.windows(2) {
            let a = g.cell_at(w[0]).unwrap().distance;
            let b = g.cell_at(w[1]).unwrap().distance;
            if a == b {
                assert!(w[0] < w[1], "{} expanded before {}", w[0], w[1]);
            }
        }
    }

    #[test]
    fn replaying_relaxations_reproduces_state() {
        let mut g = porous(4, 12, 0.65);
        let trace = run_dijkstra(&mut g);
        let mut dist = vec![UNREACHABLE; g.len()];
        let mut parent = vec![None; g.len()];
        dist[g.start()] = 0;
        for step in &trace.steps {
            let ci = g.index_of(step.cell).unwrap();
            for r in &step.neighbors {
                let ni = g.index_of(r.cell).unwrap();
                assert_eq!(g.weight(ci, ni), Some(r.weight));
                dist[ni] = dist[ci] + r.weight;
                parent[ni] = Some(ci);
            }
        }
        for (i, c) in g.cells().iter().enumerate() {
            assert_eq!(dist[i], c.distance);
            assert_eq!(parent[i], c.parent);
        }
    }

    #[test]
    fn stop_at_end_keeps_cost() {
        let mut g = porous(4, 3, 0.8);
        let full = run_dijkstra(&mut g);
        let mut solver = Solver::new(SearchOptions {
            stop_at_end: true,
            ..SearchOptions::default()
        });
        let early = solver.dijkstra(&mut g);
        if full.is_found() {
            assert_eq!(early.path_cost(&g), full.path_cost(&g));
            assert_eq!(early.steps.last().unwrap().cell, g.end_pos());
            assert!(early.steps.len() <= full.steps.len());
            assert_eq!(early.steps[..], full.steps[..early.steps.len()]);
        } else {
            assert_eq!(early, full);
        }
    }
}
