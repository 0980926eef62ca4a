//! Ionization energies and azimuthal quantum numbers of selected elements.
//!
//! Ionization energies are from the NIST Atomic Spectra Database. The
//! azimuthal quantum number at charge state `Z` is that of the outermost
//! electron of the ion with charge `Z`, i.e. the electron removed in the
//! transition `Z -> Z + 1`.

use super::super::fpl;
use lazy_static::lazy_static;
use std::{collections::HashMap, io};

/// Static ionization data for a chemical element.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementData {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Standard atomic weight [amu].
    pub atomic_mass: fpl,
    /// Ionization energy for each charge state [eV].
    pub ionization_energies: &'static [fpl],
    /// Azimuthal quantum number of the removed electron for each charge state.
    pub azimuthal_quantum_numbers: &'static [u32],
}

impl ElementData {
    /// Returns the atomic number, which equals the number of charge states
    /// that can be ionized.
    pub fn atomic_number(&self) -> usize {
        self.ionization_energies.len()
    }
}

pub static ELEMENTS: &[ElementData] = &[
    ElementData {
        symbol: "H",
        name: "hydrogen",
        atomic_mass: 1.008,
        ionization_energies: &[13.598_434],
        azimuthal_quantum_numbers: &[0],
    },
    ElementData {
        symbol: "He",
        name: "helium",
        atomic_mass: 4.002_602,
        ionization_energies: &[24.587_389, 54.417_765],
        azimuthal_quantum_numbers: &[0, 0],
    },
    ElementData {
        symbol: "Li",
        name: "lithium",
        atomic_mass: 6.94,
        ionization_energies: &[5.391_715, 75.640_097, 122.454_36],
        azimuthal_quantum_numbers: &[0, 0, 0],
    },
    ElementData {
        symbol: "C",
        name: "carbon",
        atomic_mass: 12.011,
        ionization_energies: &[11.260_3, 24.383_3, 47.887_8, 64.493_9, 392.087, 489.993_2],
        azimuthal_quantum_numbers: &[1, 1, 0, 0, 0, 0],
    },
    ElementData {
        symbol: "N",
        name: "nitrogen",
        atomic_mass: 14.007,
        ionization_energies: &[
            14.534_1, 29.601_3, 47.445_3, 77.473_5, 97.890_1, 552.071_8, 667.046,
        ],
        azimuthal_quantum_numbers: &[1, 1, 1, 0, 0, 0, 0],
    },
    ElementData {
        symbol: "O",
        name: "oxygen",
        atomic_mass: 15.999,
        ionization_energies: &[
            13.618_1, 35.121_1, 54.935_5, 77.413_5, 113.899, 138.119_7, 739.29, 871.410_1,
        ],
        azimuthal_quantum_numbers: &[1, 1, 1, 1, 0, 0, 0, 0],
    },
    ElementData {
        symbol: "Ne",
        name: "neon",
        atomic_mass: 20.179_7,
        ionization_energies: &[
            21.564_6, 40.962_97, 63.423_3, 97.19, 126.247, 157.934, 207.271, 239.097,
            1_195.807_8, 1_362.199_1,
        ],
        azimuthal_quantum_numbers: &[1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
    },
    ElementData {
        symbol: "Ar",
        name: "argon",
        atomic_mass: 39.948,
        ionization_energies: &[
            15.759_6, 27.629_67, 40.735, 59.58, 74.84, 91.29, 124.41, 143.456_7, 422.6,
            479.76, 540.4, 619.0, 685.5, 755.13, 855.5, 918.375, 4_120.666, 4_426.228,
        ],
        azimuthal_quantum_numbers: &[1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
    },
];

lazy_static! {
    static ref ELEMENTS_BY_SYMBOL: HashMap<String, &'static ElementData> = ELEMENTS
        .iter()
        .map(|element| (element.symbol.to_lowercase(), element))
        .collect();
}

/// Finds the data for the element with the given chemical symbol or name
/// (case-insensitive).
pub fn find_element(symbol_or_name: &str) -> io::Result<&'static ElementData> {
    let key = symbol_or_name.trim().to_lowercase();
    ELEMENTS_BY_SYMBOL
        .get(&key)
        .copied()
        .or_else(|| ELEMENTS.iter().find(|element| element.name == key))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("No ionization data for element {}", symbol_or_name),
            )
        })
}

/// Finds the data for the element with the given atomic number.
pub fn find_element_by_atomic_number(atomic_number: usize) -> io::Result<&'static ElementData> {
    ELEMENTS
        .iter()
        .find(|element| element.atomic_number() == atomic_number)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("No ionization data for atomic number {}", atomic_number),
            )
        })
}
