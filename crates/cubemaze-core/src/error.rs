use std::fmt;

use crate::geom::{Dims, Point3};

/// Errors raised while building or editing a [`GridGraph`](crate::GridGraph).
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Some extent is zero or negative.
    InvalidDimensions(Dims),
    /// Cell size is not a positive finite number.
    InvalidCellSize(f64),
    /// Start and end would be the same cell.
    DegenerateGrid(Dims),
    /// A point outside the grid was addressed.
    OutOfBounds(Point3),
    /// Attempt to change the start or end cell, or to assign those roles.
    FixedRole(Point3),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions(d) => {
                write!(f, "invalid grid dimensions {d}: every extent must be positive")
            }
            Self::InvalidCellSize(s) => write!(f, "invalid cell size {s}"),
            Self::DegenerateGrid(d) => {
                write!(f, "grid {d} is too small: start and end coincide")
            }
            Self::OutOfBounds(p) => write!(f, "point {p} is outside the grid"),
            Self::FixedRole(p) => write!(f, "cell {p}: start and end roles are fixed"),
        }
    }
}

impl std::error::Error for GridError {}
