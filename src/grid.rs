//! Regular grids for deposition of particle quantities.

use crate::{error::require, geometry::Dim3};
use std::io;

/// Floating-point precision to use for grids.
#[allow(non_camel_case_types)]
pub type fgr = f64;

/// Location of a point relative to the grid nodes surrounding it.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeLocation {
    /// Indices of the lower surrounding node along each dimension.
    pub lower_indices: [usize; 3],
    /// Fractional offset from the lower node in units of the cell length,
    /// in `[0, 1]` along each dimension.
    pub offsets: [fgr; 3],
}

/// A uniform Cartesian grid of nodes in one, two or three dimensions.
///
/// Unused dimensions have a single node.
#[derive(Clone, Debug, PartialEq)]
pub struct RegularGrid {
    n_dims: usize,
    shape: [usize; 3],
    lower_bounds: [fgr; 3],
    upper_bounds: [fgr; 3],
    cell_lengths: [fgr; 3],
}

impl RegularGrid {
    /// Creates a new grid with the given number of nodes and bounds along
    /// each used dimension.
    pub fn new(shape: &[usize], lower_bounds: &[fgr], upper_bounds: &[fgr]) -> io::Result<Self> {
        let n_dims = shape.len();
        require(
            (1..=3).contains(&n_dims),
            format!("Invalid number of grid dimensions: {}", n_dims),
        )?;
        require(
            lower_bounds.len() == n_dims && upper_bounds.len() == n_dims,
            "Number of grid bounds does not match grid shape",
        )?;

        let mut grid_shape = [1; 3];
        let mut grid_lower_bounds = [0.0; 3];
        let mut grid_upper_bounds = [0.0; 3];
        let mut cell_lengths = [1.0; 3];

        for dim in 0..n_dims {
            require(
                shape[dim] >= 2,
                format!("Grid needs at least two nodes along dimension {}", dim),
            )?;
            require(
                lower_bounds[dim].is_finite()
                    && upper_bounds[dim].is_finite()
                    && upper_bounds[dim] > lower_bounds[dim],
                format!(
                    "Invalid grid bounds [{}, {}] along dimension {}",
                    lower_bounds[dim], upper_bounds[dim], dim
                ),
            )?;
            grid_shape[dim] = shape[dim];
            grid_lower_bounds[dim] = lower_bounds[dim];
            grid_upper_bounds[dim] = upper_bounds[dim];
            cell_lengths[dim] = (upper_bounds[dim] - lower_bounds[dim]) / ((shape[dim] - 1) as fgr);
        }

        Ok(Self {
            n_dims,
            shape: grid_shape,
            lower_bounds: grid_lower_bounds,
            upper_bounds: grid_upper_bounds,
            cell_lengths,
        })
    }

    /// Returns the number of used dimensions.
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Returns the number of nodes along each dimension.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn lower_bound(&self, dim: Dim3) -> fgr {
        self.lower_bounds[dim.num()]
    }

    pub fn upper_bound(&self, dim: Dim3) -> fgr {
        self.upper_bounds[dim.num()]
    }

    pub fn cell_length(&self, dim: Dim3) -> fgr {
        self.cell_lengths[dim.num()]
    }

    /// Computes the volume (or area or length) of a grid cell.
    pub fn cell_volume(&self) -> fgr {
        Dim3::first(self.n_dims)
            .iter()
            .map(|&dim| self.cell_length(dim))
            .product()
    }

    /// Returns the coordinate of the node with the given index along the given dimension.
    pub fn node_coord(&self, dim: Dim3, idx: usize) -> fgr {
        self.lower_bounds[dim.num()] + (idx as fgr) * self.cell_lengths[dim.num()]
    }

    /// Finds the lower surrounding node of the given position along with the
    /// fractional offsets, or `None` if the position lies outside the grid.
    ///
    /// Only the first `n_dims` components of the position are used.
    pub fn locate(&self, position: &[fgr]) -> Option<NodeLocation> {
        if position.len() < self.n_dims {
            return None;
        }
        let mut lower_indices = [0; 3];
        let mut offsets = [0.0; 3];

        for dim in 0..self.n_dims {
            let coord = position[dim];
            if !(coord >= self.lower_bounds[dim] && coord <= self.upper_bounds[dim]) {
                return None;
            }
            let scaled = (coord - self.lower_bounds[dim]) / self.cell_lengths[dim];
            let last_cell = self.shape[dim] - 2;
            let idx = usize::min(scaled.floor() as usize, last_cell);
            lower_indices[dim] = idx;
            offsets[dim] = fgr::min(scaled - idx as fgr, 1.0);
        }
        Some(NodeLocation {
            lower_indices,
            offsets,
        })
    }
}
