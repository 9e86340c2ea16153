//! **cubemaze-core**: the 3D lattice a maze solver runs on.
//!
//! This crate provides geometry primitives, the weighted grid graph with its
//! per-cell search state, and a depth-first maze carver. Search algorithms
//! live in `cubemaze-paths`.

pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
pub mod graph;
pub mod mazegen;

pub use cell::{Cell, Role, UNREACHABLE};
pub use config::GridConfig;
pub use error::GridError;
pub use geom::{Bounds, Dims, Point3};
pub use graph::{Edge, GridGraph, MAX_WEIGHT, MIN_WEIGHT};
pub use mazegen::MazeGen;
