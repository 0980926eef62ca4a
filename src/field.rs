//! Electromagnetic field quantities seen by particles and stored on grids.

use crate::{
    geometry::{Dim3, Vec3},
    grid::RegularGrid,
    num::compensated_sum,
};
use ndarray::{Array3, Zip};

/// Floating-point precision to use for field quantities.
#[allow(non_camel_case_types)]
pub type ffl = f64;

/// Electric field sample interpolated to the location of a particle.
pub type LocalFields = Vec3<ffl>;

/// Current density components defined on the nodes of a regular grid.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentDensity {
    components: [Array3<ffl>; 3],
}

impl CurrentDensity {
    /// Creates a zero current density on the nodes of the given grid.
    pub fn zeros(grid: &RegularGrid) -> Self {
        let [nx, ny, nz] = grid.shape();
        let create = || Array3::zeros((nx, ny, nz));
        Self {
            components: [create(), create(), create()],
        }
    }

    /// Returns the values of the given current density component.
    pub fn component(&self, dim: Dim3) -> &Array3<ffl> {
        &self.components[dim.num()]
    }

    /// Returns a mutable reference to the values of the given component.
    pub fn component_mut(&mut self, dim: Dim3) -> &mut Array3<ffl> {
        &mut self.components[dim.num()]
    }

    /// Sets all current density values to zero.
    pub fn reset(&mut self) {
        for component in &mut self.components {
            component.fill(0.0);
        }
    }

    /// Computes the sum of each component over all nodes, using compensated
    /// summation.
    pub fn totals(&self) -> Vec3<ffl> {
        Vec3::with_each_component(|dim| {
            compensated_sum(self.components[dim.num()].iter().copied())
        })
    }

    /// Adds the values of another current density defined on the same grid.
    ///
    /// # Panics
    ///
    /// If the shapes differ.
    pub fn accumulate(&mut self, other: &Self) {
        for (component, other_component) in self.components.iter_mut().zip(other.components.iter())
        {
            Zip::from(component)
                .and(other_component)
                .par_for_each(|value, &other_value| *value += other_value);
        }
    }
}
