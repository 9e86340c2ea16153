use cubemaze_core::GridGraph;

use crate::Solver;
use crate::solver::Algorithm;
use crate::trace::Trace;

impl Solver {
    /// A* from the start towards the end.
    ///
    /// Same expansion and relaxation as [`dijkstra`](Self::dijkstra), but
    /// cells are ordered by `distance + heuristic` using
    /// [`SearchOptions::heuristic`](crate::SearchOptions::heuristic). A
    /// relaxed cell stores its estimate in `heuristic`.
    ///
    /// With the default [`Heuristic::Euclidean`](crate::Heuristic::Euclidean)
    /// on cells larger than the minimum edge weight the estimate can
    /// overestimate, and since finalized cells are never reopened the path
    /// found may cost more than Dijkstra's.
    pub fn astar(&mut self, graph: &mut GridGraph) -> Trace {
        let heuristic = self.options.heuristic;
        self.best_first(graph, Algorithm::AStar, Some(heuristic))
    }
}
