use std::fmt;
use std::str::FromStr;

use cubemaze_core::{GridGraph, MIN_WEIGHT};

use crate::solver::ParseNameError;

/// Straight-line distance between two world-space positions.
#[inline]
pub fn euclidean(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Distance-to-end estimate used by A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    /// World-space distance to the end cell (lattice distance scaled by the
    /// cell size). Edge weights are unrelated to geometry, so this can
    /// overestimate once the cell size exceeds [`MIN_WEIGHT`].
    #[default]
    Euclidean,
    /// Lattice distance to the end times [`MIN_WEIGHT`]. Every hop costs at
    /// least `MIN_WEIGHT` and moves one lattice unit, so this never
    /// overestimates and is consistent.
    Admissible,
    /// Always 0; A* then orders exactly like Dijkstra.
    Zero,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [Heuristic::Euclidean, Heuristic::Admissible, Heuristic::Zero];

    /// Estimate the remaining cost from cell `idx` to the end of `graph`.
    pub fn estimate(self, graph: &GridGraph, idx: usize) -> f64 {
        match self {
            Heuristic::Euclidean => {
                euclidean(graph.world_position(idx), graph.world_position(graph.end()))
            }
            Heuristic::Admissible => {
                graph.point(idx).euclidean(graph.end_pos()) * f64::from(MIN_WEIGHT)
            }
            Heuristic::Zero => 0.0,
        }
    }

    /// Whether the estimate can never exceed the true remaining cost on a
    /// grid with the given cell size.
    pub fn is_admissible(self, cell_size: f64) -> bool {
        match self {
            Heuristic::Euclidean => cell_size <= f64::from(MIN_WEIGHT),
            Heuristic::Admissible | Heuristic::Zero => true,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Euclidean => "euclidean",
            Heuristic::Admissible => "admissible",
            Heuristic::Zero => "zero",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Heuristic::Euclidean),
            "admissible" => Ok(Heuristic::Admissible),
            "zero" | "none" => Ok(Heuristic::Zero),
            _ => Err(ParseNameError::new("heuristic", s)),
        }
    }
}
