use cubemaze_core::{GridGraph, Role};

use crate::Solver;
use crate::solver::Algorithm;
use crate::trace::{Recorder, Relaxed, Step, Trace};

impl Solver {
    /// Breadth-first search from the start to the end.
    ///
    /// Edge weights are ignored: the path found is shortest by hop count and
    /// each cell's `distance` is its hop count from the start. One step is
    /// recorded per dequeued cell, listing the neighbours it discovered. The
    /// search stops when the end is dequeued.
    pub fn bfs(&mut self, graph: &mut GridGraph) -> Trace {
        graph.reset();
        let mut rec = Recorder::new(Algorithm::Bfs);

        let start = graph.start();
        let end = graph.end();
        self.queue.clear();
        graph.cell_mut(start).visited = true;
        self.queue.push_back(start);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = self.queue.pop_front() {
            let cp = graph.point(ci);
            if ci == end {
                rec.push(Step {
                    cell: cp,
                    neighbors: Vec::new(),
                });
                break;
            }

            let next_dist = graph.cell(ci).distance + 1;
            nbuf.clear();
            nbuf.extend_from_slice(graph.neighbors(ci));

            let mut discovered = Vec::with_capacity(nbuf.len());
            for e in nbuf.iter() {
                let n = graph.cell_mut(e.to);
                if n.visited || !matches!(n.role(), Role::Open | Role::End) {
                    continue;
                }
                n.visited = true;
                n.distance = next_dist;
                n.parent = Some(ci);
                self.queue.push_back(e.to);
                discovered.push(Relaxed {
                    cell: n.pos(),
                    weight: e.weight,
                });
            }

            rec.push(Step {
                cell: cp,
                neighbors: discovered,
            });
        }

        self.nbuf = nbuf;
        rec.finish(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run_bfs;
    use cubemaze_core::{Dims, MazeGen, Point3, UNREACHABLE};
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn open_grid(dims: Dims) -> GridGraph {
        let mut g =
            GridGraph::build_with_rng(dims, 1.0, &mut StdRng::seed_from_u64(17)).unwrap();
        g.open_all();
        g
    }

    /// Grid with roughly `open_pct` of its cells opened at random.
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

    /// Hop distances by repeated relaxation over passable cells.
    fn reference_hops(g: &GridGraph) -> Vec<u32> {
        let mut d = vec![UNREACHABLE; g.len()];
        d[g.start()] = 0;
        loop {
            let mut changed = false;
            for i in 0..g.len() {
                if d[i] == UNREACHABLE || !g.is_passable(i) {
                    continue;
                }
                for e in g.neighbors(i) {
                    if g.is_passable(e.to) && d[i] + 1 < d[e.to] {
                        d[e.to] = d[i] + 1;
                        changed = true;
                    }
                }
            }
            if !changed {
                return d;
            }
        }
    }

    #[test]
    fn two_cube_visits_every_cell() {
        let mut g = open_grid(Dims::cube(2));
        let trace = run_bfs(&mut g);
        assert_eq!(trace.steps.len(), 8);
        assert_eq!(trace.path.len(), 4);
        assert_eq!(trace.hop_count(), 3);
        assert_eq!(trace.path[0], Point3::ZERO);
        assert_eq!(trace.path[3], Point3::new(1, 1, 1));
        assert_eq!(trace.steps[7].cell, Point3::new(1, 1, 1));
        // Start discovers its three neighbours in +x, +y, +z order.
        let first: Vec<Point3> = trace.steps[0].neighbors.iter().map(|r| r.cell).collect();
        assert_eq!(
            first,
            vec![Point3::new(1, 0, 0), Point3::new(0, 1, 0), Point3::new(0, 0, 1)]
        );
    }

    #[test]
    fn hop_count_matches_reference() {
        for seed in 0..15 {
            let mut g = porous(4, seed, 0.6);
            let reference = reference_hops(&g);
            let trace = run_bfs(&mut g);
            let want = reference[g.end()];
            if want == UNREACHABLE {
                assert!(!trace.is_found(), "seed {seed}");
            } else {
                assert_eq!(trace.hop_count() as u32, want, "seed {seed}");
            }
        }
    }

    #[test]
    fn distances_match_reference_for_reached_cells() {
        let mut g = porous(4, 99, 0.7);
        g.set_role(Point3::new(3, 3, 2), Role::Wall).unwrap();
        g.set_role(Point3::new(3, 2, 3), Role::Wall).unwrap();
        g.set_role(Point3::new(2, 3, 3), Role::Wall).unwrap();
        // End is walled off, so the search runs to exhaustion.
        let reference = reference_hops(&g);
        let trace = run_bfs(&mut g);
        assert!(!trace.is_found());
        for (i, c) in g.cells().iter().enumerate() {
            assert_eq!(c.distance, reference[i], "cell {}", c.pos());
            assert_eq!(c.visited, reference[i] != UNREACHABLE);
        }
    }

    #[test]
    fn replaying_steps_reproduces_parents() {
        let mut g = GridGraph::build_with_rng(Dims::cube(5), 1.0, &mut StdRng::seed_from_u64(6))
            .unwrap();
        MazeGen::new(StdRng::seed_from_u64(6)).carve(&mut g);
        let trace = run_bfs(&mut g);

        let mut dist = vec![UNREACHABLE; g.len()];
        let mut parent = vec![None; g.len()];
        dist[g.start()] = 0;
        for step in &trace.steps {
            let ci = g.index_of(step.cell).unwrap();
            for r in &step.neighbors {
                let ni = g.index_of(r.cell).unwrap();
                dist[ni] = dist[ci] + 1;
                parent[ni] = Some(ci);
            }
        }
        for (i, c) in g.cells().iter().enumerate() {
            assert_eq!(dist[i], c.distance);
            assert_eq!(parent[i], c.parent);
        }
    }

    #[test]
    fn stops_when_end_dequeued() {
        let mut g = open_grid(Dims::new(6, 1, 1));
        let trace = run_bfs(&mut g);
        assert_eq!(trace.steps.len(), 6);
        assert_eq!(trace.hop_count(), 5);
        assert_eq!(trace.steps.last().unwrap().cell, g.end_pos());
    }
}
