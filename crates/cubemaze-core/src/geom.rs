//! Geometry primitives: [`Point3`], [`Dims`] and [`Bounds`].
//!
//! Cells live on an integer lattice. [`Bounds`] linearizes lattice points
//! into arena indices in scan order (x outer, then z, then y), so iterating
//! a `Bounds` and iterating `0..len` visit cells in the same order.

use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Point3
// ---------------------------------------------------------------------------

/// A 3D integer lattice point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a point shifted by (dx, dy, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// The six axis-aligned neighbours, in the order +x, -x, +y, -y, +z, -z.
    #[inline]
    pub const fn neighbors_6(self) -> [Point3; 6] {
        [
            self.shift(1, 0, 0),
            self.shift(-1, 0, 0),
            self.shift(0, 1, 0),
            self.shift(0, -1, 0),
            self.shift(0, 0, 1),
            self.shift(0, 0, -1),
        ]
    }

    /// Manhattan (L1) distance.
    #[inline]
    pub fn manhattan(self, other: Point3) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }

    /// Straight-line distance in lattice units.
    #[inline]
    pub fn euclidean(self, other: Point3) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        let dz = f64::from(self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

// Scan order: x, then z, then y.
impl PartialOrd for Point3 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point3 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .cmp(&other.x)
            .then(self.z.cmp(&other.z))
            .then(self.y.cmp(&other.y))
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Dims
// ---------------------------------------------------------------------------

/// Grid extent along each axis: `width` (x), `height` (y), `depth` (z).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
}

impl Dims {
    /// Create new dimensions.
    #[inline]
    pub const fn new(width: i32, height: i32, depth: i32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// An `n`x`n`x`n` cube.
    #[inline]
    pub const fn cube(n: i32) -> Self {
        Self::new(n, n, n)
    }

    /// Whether every extent is strictly positive.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0 && self.depth > 0
    }

    /// Number of lattice points, or 0 if any extent is non-positive.
    #[inline]
    pub fn volume(self) -> usize {
        if !self.is_valid() {
            return 0;
        }
        self.width as usize * self.height as usize * self.depth as usize
    }
}

impl Default for Dims {
    fn default() -> Self {
        Self::cube(10)
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The half-open box `[0, dims)` and its arena linearization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    dims: Dims,
}

impl Bounds {
    /// Bounds covering `dims`. Non-positive extents give an empty box.
    #[inline]
    pub const fn new(dims: Dims) -> Self {
        Self { dims }
    }

    #[inline]
    pub const fn dims(self) -> Dims {
        self.dims
    }

    /// Number of lattice points inside.
    #[inline]
    pub fn len(self) -> usize {
        self.dims.volume()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Whether `p` lies inside the box.
    #[inline]
    pub fn contains(self, p: Point3) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.z >= 0
            && p.x < self.dims.width
            && p.y < self.dims.height
            && p.z < self.dims.depth
    }

    /// The corner opposite the origin, `(w-1, h-1, d-1)`.
    #[inline]
    pub fn far_corner(self) -> Point3 {
        Point3::new(
            self.dims.width - 1,
            self.dims.height - 1,
            self.dims.depth - 1,
        )
    }

    /// Whether `p` is inside and touches at least one face of the box.
    pub fn is_boundary(self, p: Point3) -> bool {
        let far = self.far_corner();
        self.contains(p)
            && (p.x == 0 || p.y == 0 || p.z == 0 || p.x == far.x || p.y == far.y || p.z == far.z)
    }

    /// Convert a point to its arena index. Returns `None` if out of bounds.
    #[inline]
    pub fn index(self, p: Point3) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let h = self.dims.height as usize;
        let d = self.dims.depth as usize;
        Some((p.x as usize * d + p.z as usize) * h + p.y as usize)
    }

    /// Convert an arena index back to a point. `idx` must be `< len()`.
    #[inline]
    pub fn point(self, idx: usize) -> Point3 {
        let h = self.dims.height.max(1) as usize;
        let d = self.dims.depth.max(1) as usize;
        let y = idx % h;
        let rest = idx / h;
        let z = rest % d;
        let x = rest / d;
        Point3::new(x as i32, y as i32, z as i32)
    }

    /// Scan-order iterator over every point in the box.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
            len: self.len(),
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Point3;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", Point3::ZERO, self.far_corner())
    }
}

/// Scan-order iterator over the points in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
    len: usize,
}

impl Iterator for BoundsIter {
    type Item = Point3;

    #[inline]
    fn next(&mut self) -> Option<Point3> {
        if self.next >= self.len {
            return None;
        }
        let p = self.bounds.point(self.next);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.len - self.next;
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for BoundsIter {}
