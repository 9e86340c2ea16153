use crate::geom::Dims;

/// Parameters for building a [`GridGraph`](crate::GridGraph).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub dims: Dims,
    /// World-space edge length of one cell.
    pub cell_size: f64,
    /// Seed for edge weights and carving. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dims: Dims::default(),
            cell_size: 1.0,
            seed: None,
        }
    }
}
