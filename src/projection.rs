//! Projection of point currents onto grid nodes.

use crate::{
    field::{ffl, CurrentDensity},
    geometry::{Dim3, Vec3},
    grid::RegularGrid,
};

/// Deposits point current contributions onto a spatial grid.
pub trait CurrentProjector {
    /// Scatters the current of a macro-particle with the given position and
    /// weight onto the grid.
    fn deposit_current(&mut self, position: &[ffl], weight: ffl, current: &Vec3<ffl>);
}

/// Projector using linear (cloud-in-cell) weighting onto the nodes
/// surrounding the particle. Contributions from outside the grid are dropped.
#[derive(Debug)]
pub struct LinearProjector<'a> {
    grid: &'a RegularGrid,
    currents: &'a mut CurrentDensity,
}

impl<'a> LinearProjector<'a> {
    pub fn new(grid: &'a RegularGrid, currents: &'a mut CurrentDensity) -> Self {
        Self { grid, currents }
    }
}

impl<'a> CurrentProjector for LinearProjector<'a> {
    fn deposit_current(&mut self, position: &[ffl], weight: ffl, current: &Vec3<ffl>) {
        let location = match self.grid.locate(position) {
            Some(location) => location,
            None => return,
        };
        let weighted_current = current * weight;
        let n_dims = self.grid.n_dims();

        // Loop over the 2^n_dims corner nodes of the enclosing cell
        for corner in 0..(1_usize << n_dims) {
            let mut node = [0; 3];
            let mut node_weight = 1.0;
            for dim in 0..n_dims {
                let upper = (corner >> dim) & 1 == 1;
                let offset = location.offsets[dim];
                node[dim] = location.lower_indices[dim] + usize::from(upper);
                node_weight *= if upper { offset } else { 1.0 - offset };
            }
            if node_weight == 0.0 {
                continue;
            }
            for dim in Dim3::slice() {
                self.currents.component_mut(dim)[node] += node_weight * weighted_current[dim];
            }
        }
    }
}

/// Projector that records every deposited contribution without a grid.
#[derive(Clone, Debug, Default)]
pub struct RecordingProjector {
    deposits: Vec<(Vec<ffl>, ffl, Vec3<ffl>)>,
}

impl RecordingProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded `(position, weight, current)` contributions in
    /// the order they were deposited.
    pub fn deposits(&self) -> &[(Vec<ffl>, ffl, Vec3<ffl>)] {
        &self.deposits
    }

    /// Computes the sum of the weighted current contributions.
    pub fn total_weighted_current(&self) -> Vec3<ffl> {
        self.deposits
            .iter()
            .fold(Vec3::zero(), |total, (_, weight, current)| {
                total + current * *weight
            })
    }
}

impl CurrentProjector for RecordingProjector {
    fn deposit_current(&mut self, position: &[ffl], weight: ffl, current: &Vec3<ffl>) {
        self.deposits.push((position.to_vec(), weight, *current));
    }
}
