#![allow(dead_code)]

use fieldion::{
    field::LocalFields,
    geometry::Vec3,
    particles::{fpt, Particles},
    plasma::{
        fpl,
        ionization::{profile::IonizationProfile, tables::find_element, tunnel::TunnelIonization},
    },
    units::AtomicUnitConversion,
};
use rand::rngs::mock::StepRng;
use std::path::PathBuf;
use tempfile::TempDir;

#[cfg(feature = "cli")]
use std::ffi::OsString;

pub const REFERENCE_WAVELENGTH: fpl = 0.8e-6;

#[cfg(feature = "cli")]
pub fn run<I, T>(args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    fieldion::cli::run::run_with_args(
        fieldion::cli::build::build().get_matches_from(
            std::iter::once(OsString::from("fieldion")).chain(args.into_iter().map(Into::into)),
        ),
    );
}

/// Output directory that is removed when the test finishes.
#[derive(Debug)]
pub struct Test {
    output_dir: TempDir,
}

impl Test {
    pub fn new() -> Self {
        Self {
            output_dir: tempfile::tempdir().expect("Could not create temporary directory"),
        }
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.path().join(file_name)
    }
}

/// Random number generator whose every uniform draw equals the given value.
pub fn constant_draw_rng(draw: f64) -> StepRng {
    assert!((0.0..1.0).contains(&draw));
    StepRng::new(((draw * (1_u64 << 53) as f64) as u64) << 11, 0)
}

pub fn reference_conversion() -> AtomicUnitConversion {
    AtomicUnitConversion::for_reference_wavelength(REFERENCE_WAVELENGTH).unwrap()
}

/// Conversion where normalized fields equal fields in atomic units.
pub fn unit_field_conversion(au_to_w0: fpl) -> AtomicUnitConversion {
    AtomicUnitConversion {
        ec_to_au: 1.0,
        au_to_w0,
        ..reference_conversion()
    }
}

pub fn element_profile(symbol: &str, conversion: &AtomicUnitConversion) -> IonizationProfile {
    IonizationProfile::for_element(find_element(symbol).unwrap(), conversion).unwrap()
}

pub fn tunnel_model_for_element(symbol: &str, dt: fpl) -> TunnelIonization {
    let conversion = reference_conversion();
    TunnelIonization::new(element_profile(symbol, &conversion), &conversion, dt).unwrap()
}

/// Tunneling model for a species with the given potentials [atomic units]
/// where a normalized field of one is one atomic unit.
pub fn custom_tunnel_model(potentials: &[fpl], au_to_w0: fpl, dt: fpl) -> TunnelIonization {
    let profile =
        IonizationProfile::new(potentials.to_vec(), vec![0; potentials.len()], 1836.0).unwrap();
    TunnelIonization::new(profile, &unit_field_conversion(au_to_w0), dt).unwrap()
}

/// Normalized field along x with the given strength in atomic units.
pub fn field_with_strength(strength_au: fpl, conversion: &AtomicUnitConversion) -> LocalFields {
    Vec3::new(strength_au / conversion.ec_to_au, 0.0, 0.0)
}

/// Ions in one dimension with the given charges, placed at unit spacing with
/// a small momentum along x and weights increasing with index.
pub fn ions_with_charges(charges: &[i32]) -> Particles {
    let mut ions = Particles::new(1);
    for (idx, &charge) in charges.iter().enumerate() {
        ions.create_particle(
            &[idx as fpt + 0.5],
            &Vec3::new(0.01, 0.0, 0.0),
            1.0 + idx as fpt,
            charge,
        );
    }
    ions
}

#[cfg(feature = "for-testing")]
pub fn assert_vectors_relative_eq(actual: &Vec3<fpl>, expected: &Vec3<fpl>, max_relative: fpl) {
    approx::assert_relative_eq!(*actual, *expected, max_relative = max_relative);
}

#[cfg(not(feature = "for-testing"))]
pub fn assert_vectors_relative_eq(actual: &Vec3<fpl>, expected: &Vec3<fpl>, max_relative: fpl) {
    for dim in fieldion::geometry::Dim3::slice() {
        approx::assert_relative_eq!(actual[dim], expected[dim], max_relative = max_relative);
    }
}
