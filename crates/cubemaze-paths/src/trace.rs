//! Recorded search history.
//!
//! A [`Trace`] is what a search hands back to whoever animates it: the
//! cells in the order they were expanded, with the neighbours each
//! expansion discovered or relaxed, followed by the shortest path.

use cubemaze_core::{GridGraph, Point3};

use crate::solver::Algorithm;

/// A neighbour discovered or relaxed during a step, with the weight of the
/// edge used to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relaxed {
    pub cell: Point3,
    pub weight: u32,
}

/// One expansion: the cell taken off the frontier and what it touched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub cell: Point3,
    pub neighbors: Vec<Relaxed>,
}

/// The full, replayable history of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    pub algorithm: Algorithm,
    pub steps: Vec<Step>,
    /// Start to end inclusive; empty when the end was not reached.
    pub path: Vec<Point3>,
}

impl Trace {
    /// Whether a path to the end was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves along the path (0 when not found).
    #[inline]
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Sum of directed edge weights along the path, or `None` when no path
    /// was found or the path does not belong to `graph`.
    pub fn path_cost(&self, graph: &GridGraph) -> Option<u32> {
        if self.path.is_empty() {
            return None;
        }
        self.path.windows(2).try_fold(0u32, |acc, w| {
            let from = graph.index_of(w[0])?;
            let to = graph.index_of(w[1])?;
            Some(acc + graph.weight(from, to)?)
        })
    }

    /// Expanded cells in order.
    pub fn visited(&self) -> impl Iterator<Item = Point3> + '_ {
        self.steps.iter().map(|s| s.cell)
    }

    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Accumulates steps during a run and builds the final [`Trace`].
pub(crate) struct Recorder {
    algorithm: Algorithm,
    steps: Vec<Step>,
}

impl Recorder {
    pub(crate) fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            steps: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, step: Step) {
        log::trace!(
            "{} step {}: {} -> {} neighbors",
            self.algorithm,
            self.steps.len(),
            step.cell,
            step.neighbors.len()
        );
        self.steps.push(step);
    }

    /// Walk parent links back from the end and seal the trace.
    pub(crate) fn finish(self, graph: &GridGraph) -> Trace {
        let path = backtrack(graph);
        log::debug!(
            "{}: {} steps, {}",
            self.algorithm,
            self.steps.len(),
            if path.is_empty() {
                "no path found".to_string()
            } else {
                format!("path of {} cells", path.len())
            }
        );
        Trace {
            algorithm: self.algorithm,
            steps: self.steps,
            path,
        }
    }
}

/// Parent chain from the end back to the start, reversed. Empty if the end
/// was never reached or the chain does not lead to the start.
fn backtrack(graph: &GridGraph) -> Vec<Point3> {
    let end = graph.end();
    if !graph.cell(end).is_reached() {
        return Vec::new();
    }
    let mut path = vec![graph.point(end)];
    let mut ci = end;
    while let Some(parent) = graph.cell(ci).parent {
        if path.len() > graph.len() {
            return Vec::new();
        }
        path.push(graph.point(parent));
        ci = parent;
    }
    if ci != graph.start() {
        return Vec::new();
    }
    path.reverse();
    path
}
