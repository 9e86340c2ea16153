//! The weighted lattice graph.
//!
//! [`GridGraph`] owns an arena of [`Cell`]s indexed by [`Bounds::index`] and
//! one adjacency list per cell. Adjacency and weights are fixed at build
//! time; only roles (wall/open) and per-run search state change afterwards.

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

use crate::cell::{Cell, Role};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::geom::{Bounds, Dims, Point3};

/// Smallest edge weight.
pub const MIN_WEIGHT: u32 = 1;
/// Largest edge weight.
pub const MAX_WEIGHT: u32 = 10;

/// A directed edge to the arena index `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub to: usize,
    pub weight: u32,
}

/// A 3D lattice of cells with weighted 6-neighbour adjacency.
#[derive(Debug, Clone)]
pub struct GridGraph {
    bounds: Bounds,
    cell_size: f64,
    cells: Vec<Cell>,
    adjacency: Vec<Vec<Edge>>,
    start: usize,
    end: usize,
}

impl GridGraph {
    /// Build a grid with weights drawn from the thread RNG.
    pub fn build(dims: Dims, cell_size: f64) -> Result<Self, GridError> {
        Self::build_with_rng(dims, cell_size, &mut rand::rng())
    }

    /// Build a grid from a [`GridConfig`], seeding weights when a seed is set.
    pub fn from_config(cfg: &GridConfig) -> Result<Self, GridError> {
        match cfg.seed {
            Some(seed) => {
                Self::build_with_rng(cfg.dims, cfg.cell_size, &mut StdRng::seed_from_u64(seed))
            }
            None => Self::build(cfg.dims, cfg.cell_size),
        }
    }

    /// Build a grid, drawing one weight in `[MIN_WEIGHT, MAX_WEIGHT]` per
    /// directed edge from `rng` in scan order.
    ///
    /// The start is the origin corner and the end the opposite corner; every
    /// other cell starts out as a wall.
    pub fn build_with_rng<R: Rng>(
        dims: Dims,
        cell_size: f64,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        if !dims.is_valid() {
            return Err(GridError::InvalidDimensions(dims));
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        let bounds = Bounds::new(dims);
        let far = bounds.far_corner();
        if far == Point3::ZERO {
            return Err(GridError::DegenerateGrid(dims));
        }

        let len = bounds.len();
        let mut cells = Vec::with_capacity(len);
        let mut adjacency = Vec::with_capacity(len);
        let mut edge_count = 0usize;

        for p in bounds.iter() {
            let role = if p == Point3::ZERO {
                Role::Start
            } else if p == far {
                Role::End
            } else {
                Role::Wall
            };
            cells.push(Cell::new(p, role));

            let edges: Vec<Edge> = p
                .neighbors_6()
                .into_iter()
                .filter_map(|n| bounds.index(n))
                .map(|to| Edge {
                    to,
                    weight: rng.random_range(MIN_WEIGHT..=MAX_WEIGHT),
                })
                .collect();
            edge_count += edges.len();
            adjacency.push(edges);
        }

        let start = 0;
        let end = len - 1;
        debug_assert_eq!(bounds.index(far), Some(end));

        log::debug!("built {dims} grid: {len} cells, {edge_count} directed edges");

        Ok(Self {
            bounds,
            cell_size,
            cells,
            adjacency,
            start,
            end,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.bounds.dims()
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a successfully built grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Arena index of the start cell.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Arena index of the end cell.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn start_pos(&self) -> Point3 {
        self.cells[self.start].pos()
    }

    #[inline]
    pub fn end_pos(&self) -> Point3 {
        self.cells[self.end].pos()
    }

    /// All cells in scan order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at arena index `idx`. Panics if out of range.
    #[inline]
    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Mutable access to a cell's search state. Panics if out of range.
    #[inline]
    pub fn cell_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    #[inline]
    pub fn index_of(&self, p: Point3) -> Option<usize> {
        self.bounds.index(p)
    }

    #[inline]
    pub fn point(&self, idx: usize) -> Point3 {
        self.cells[idx].pos()
    }

    pub fn cell_at(&self, p: Point3) -> Option<&Cell> {
        self.index_of(p).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn is_passable(&self, idx: usize) -> bool {
        self.cells[idx].is_passable()
    }

    /// Outgoing edges of `idx`, in +x, -x, +y, -y, +z, -z order (missing
    /// directions skipped at the boundary).
    #[inline]
    pub fn neighbors(&self, idx: usize) -> &[Edge] {
        &self.adjacency[idx]
    }

    /// Weight of the directed edge `from -> to`, if they are adjacent.
    pub fn weight(&self, from: usize, to: usize) -> Option<u32> {
        self.adjacency
            .get(from)?
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.weight)
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Centre of the cell in world space.
    pub fn world_position(&self, idx: usize) -> [f64; 3] {
        let p = self.cells[idx].pos();
        let s = self.cell_size;
        [
            (f64::from(p.x) + 0.5) * s,
            (f64::from(p.y) + 0.5) * s,
            (f64::from(p.z) + 0.5) * s,
        ]
    }

    /// Number of cells with the given role.
    pub fn count(&self, role: Role) -> usize {
        self.cells.iter().filter(|c| c.role() == role).count()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Flip the cell at `p` between [`Role::Wall`] and [`Role::Open`].
    pub fn set_role(&mut self, p: Point3, role: Role) -> Result<(), GridError> {
        let idx = self.index_of(p).ok_or(GridError::OutOfBounds(p))?;
        if role.is_fixed() || self.cells[idx].role().is_fixed() {
            return Err(GridError::FixedRole(p));
        }
        self.cells[idx].set_role(role);
        Ok(())
    }

    pub(crate) fn set_role_at(&mut self, idx: usize, role: Role) {
        debug_assert!(!role.is_fixed() && !self.cells[idx].role().is_fixed());
        self.cells[idx].set_role(role);
    }

    /// Open every wall. Returns the number of cells flipped.
    pub fn open_all(&mut self) -> usize {
        let mut n = 0;
        for c in self.cells.iter_mut().filter(|c| c.role() == Role::Wall) {
            c.set_role(Role::Open);
            n += 1;
        }
        n
    }

    /// Restore every cell's search state (`visited`, `distance`,
    /// `heuristic`, `parent`). Roles, adjacency and weights are kept.
    pub fn reset(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset();
        }
    }

    /// [`reset`](Self::reset) and turn every open cell back into a wall.
    pub fn clear(&mut self) {
        for c in self.cells.iter_mut() {
            if c.role() == Role::Open {
                c.set_role(Role::Wall);
            }
            c.reset();
        }
    }
}
