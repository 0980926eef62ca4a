//! Storage of macro-particles.

use crate::{
    geometry::{Dim3, Vec3},
    num::compensated_sum,
};

/// Floating-point precision to use for particle data.
#[allow(non_camel_case_types)]
pub type fpt = f64;

/// Charge of an electron macro-particle in units of the elementary charge.
pub const ELECTRON_CHARGE: i32 = -1;

/// Structure-of-arrays container of macro-particles.
///
/// Every particle has `n_dims` position components, three momentum
/// components, a statistical weight and an integer charge.
#[derive(Clone, Debug, PartialEq)]
pub struct Particles {
    n_dims: usize,
    positions: [Vec<fpt>; 3],
    momenta: [Vec<fpt>; 3],
    weights: Vec<fpt>,
    charges: Vec<i32>,
}

/// Read-only view of all particle data except the charges.
#[derive(Clone, Copy, Debug)]
pub struct ParticleView<'a> {
    n_dims: usize,
    positions: [&'a [fpt]; 3],
    momenta: [&'a [fpt]; 3],
    weights: &'a [fpt],
}

impl Particles {
    /// Creates an empty container for particles with the given number of
    /// position components.
    ///
    /// # Panics
    ///
    /// If `n_dims` is not 1, 2 or 3.
    pub fn new(n_dims: usize) -> Self {
        Self::with_capacity(n_dims, 0)
    }

    /// Creates an empty container with room for the given number of particles.
    pub fn with_capacity(n_dims: usize, capacity: usize) -> Self {
        assert!(
            (1..=3).contains(&n_dims),
            "Invalid number of particle dimensions: {}",
            n_dims
        );
        let create = || Vec::with_capacity(capacity);
        Self {
            n_dims,
            positions: [create(), create(), create()],
            momenta: [create(), create(), create()],
            weights: Vec::with_capacity(capacity),
            charges: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of position components of each particle.
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Returns the number of particles.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the container holds no particles.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn position(&self, dim: Dim3, idx: usize) -> fpt {
        self.positions[dim.num()][idx]
    }

    pub fn position_mut(&mut self, dim: Dim3, idx: usize) -> &mut fpt {
        &mut self.positions[dim.num()][idx]
    }

    pub fn momentum(&self, idx: usize) -> Vec3<fpt> {
        Vec3::with_each_component(|dim| self.momenta[dim.num()][idx])
    }

    pub fn set_momentum(&mut self, idx: usize, momentum: &Vec3<fpt>) {
        for dim in Dim3::slice() {
            self.momenta[dim.num()][idx] = momentum[dim];
        }
    }

    pub fn weight(&self, idx: usize) -> fpt {
        self.weights[idx]
    }

    pub fn charge(&self, idx: usize) -> i32 {
        self.charges[idx]
    }

    pub fn charge_mut(&mut self, idx: usize) -> &mut i32 {
        &mut self.charges[idx]
    }

    /// Returns the charges of all particles.
    pub fn charges(&self) -> &[i32] {
        &self.charges
    }

    /// Returns the weights of all particles.
    pub fn weights(&self) -> &[fpt] {
        &self.weights
    }

    /// Returns a read-only view of the particle data.
    pub fn view(&self) -> ParticleView<'_> {
        ParticleView {
            n_dims: self.n_dims,
            positions: [&self.positions[0], &self.positions[1], &self.positions[2]],
            momenta: [&self.momenta[0], &self.momenta[1], &self.momenta[2]],
            weights: &self.weights,
        }
    }

    /// Splits the container into mutable charges and a read-only view of the
    /// remaining particle data, so that charges can be updated while the other
    /// data are read concurrently.
    pub fn charges_with_view_mut(&mut self) -> (&mut [i32], ParticleView<'_>) {
        let view = ParticleView {
            n_dims: self.n_dims,
            positions: [&self.positions[0], &self.positions[1], &self.positions[2]],
            momenta: [&self.momenta[0], &self.momenta[1], &self.momenta[2]],
            weights: &self.weights,
        };
        (&mut self.charges, view)
    }

    /// Adds a new particle at the end of the container.
    ///
    /// # Panics
    ///
    /// If the number of position components does not match the container.
    pub fn create_particle(
        &mut self,
        position: &[fpt],
        momentum: &Vec3<fpt>,
        weight: fpt,
        charge: i32,
    ) {
        assert_eq!(
            position.len(),
            self.n_dims,
            "Wrong number of position components"
        );
        for (dim, &coord) in position.iter().enumerate() {
            self.positions[dim].push(coord);
        }
        for dim in Dim3::slice() {
            self.momenta[dim.num()].push(momentum[dim]);
        }
        self.weights.push(weight);
        self.charges.push(charge);
    }

    /// Moves all particles of the other container to the end of this one,
    /// leaving the other container empty.
    ///
    /// # Panics
    ///
    /// If the containers have different dimensionality.
    pub fn append(&mut self, other: &mut Self) {
        assert_eq!(
            self.n_dims, other.n_dims,
            "Cannot merge particles of different dimensionality"
        );
        for dim in 0..self.n_dims {
            self.positions[dim].append(&mut other.positions[dim]);
        }
        for dim in 0..3 {
            self.momenta[dim].append(&mut other.momenta[dim]);
        }
        self.weights.append(&mut other.weights);
        self.charges.append(&mut other.charges);
    }

    /// Removes all particles.
    pub fn clear(&mut self) {
        self.positions.iter_mut().for_each(Vec::clear);
        self.momenta.iter_mut().for_each(Vec::clear);
        self.weights.clear();
        self.charges.clear();
    }

    /// Computes the sum of the weights of all particles.
    pub fn total_weight(&self) -> fpt {
        compensated_sum(self.weights.iter().copied())
    }

    /// Computes the total particle weight for each charge from zero up to and
    /// including `max_charge`. Particles with other charges are ignored.
    pub fn weight_by_charge(&self, max_charge: usize) -> Vec<fpt> {
        let mut weights = vec![0.0; max_charge + 1];
        for (&charge, &weight) in self.charges.iter().zip(self.weights.iter()) {
            if charge >= 0 && (charge as usize) <= max_charge {
                weights[charge as usize] += weight;
            }
        }
        weights
    }
}

impl<'a> ParticleView<'a> {
    /// Returns the number of position components of each particle.
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Returns the position components of the given particle, with unused
    /// trailing components set to zero.
    pub fn position_coords(&self, idx: usize) -> [fpt; 3] {
        let mut coords = [0.0; 3];
        for (dim, coord) in coords.iter_mut().enumerate().take(self.n_dims) {
            *coord = self.positions[dim][idx];
        }
        coords
    }

    pub fn momentum(&self, idx: usize) -> Vec3<fpt> {
        Vec3::with_each_component(|dim| self.momenta[dim.num()][idx])
    }

    pub fn weight(&self, idx: usize) -> fpt {
        self.weights[idx]
    }
}
