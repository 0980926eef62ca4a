mod common;

use approx::assert_relative_eq;
use common::{
    assert_vectors_relative_eq, constant_draw_rng, custom_tunnel_model, element_profile,
    field_with_strength, ions_with_charges, reference_conversion, tunnel_model_for_element,
};
use fieldion::{
    field::{CurrentDensity, LocalFields},
    geometry::{Dim3, Vec3},
    grid::RegularGrid,
    particles::{Particles, ELECTRON_CHARGE},
    plasma::{
        fpl,
        ionization::{
            rate::RateCoefficientTable, tunnel::TunnelIonization, Ionization,
            IonizationModelType, SpeciesIonization,
        },
    },
    projection::{LinearProjector, RecordingProjector},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn hydrogen_in_strong_field_is_ionized_by_zero_draw() {
    let conversion = reference_conversion();
    let ionization = tunnel_model_for_element("H", 0.1);
    let field = field_with_strength(0.1, &conversion);

    let mut ions = Particles::new(2);
    ions.create_particle(&[1.0, 2.0], &Vec3::new(0.5, -0.25, 0.0), 3.0, 0);
    let mut electrons = Particles::new(2);
    let mut projector = RecordingProjector::new();

    let statistics = ionization.ionize(
        &mut ions,
        0..1,
        &[field],
        &mut projector,
        &mut constant_draw_rng(0.0),
        &mut electrons,
    );

    assert_eq!(ions.charge(0), 1);
    assert_eq!(statistics.n_processed_ions, 1);
    assert_eq!(statistics.n_ionized_ions, 1);
    assert_eq!(statistics.liberated_electron_weight, 3.0);

    assert_eq!(electrons.len(), 1);
    assert_eq!(electrons.charge(0), ELECTRON_CHARGE);
    assert_eq!(electrons.weight(0), 3.0);
    assert_eq!(electrons.position(Dim3::X, 0), 1.0);
    assert_eq!(electrons.position(Dim3::Y, 0), 2.0);
    let inverse_mass = ionization.profile().inverse_mass();
    assert_vectors_relative_eq(
        &electrons.momentum(0),
        &Vec3::new(0.5 * inverse_mass, -0.25 * inverse_mass, 0.0),
        1e-15,
    );

    let deposits = projector.deposits();
    assert_eq!(deposits.len(), 1);
    let (position, weight, current) = &deposits[0];
    assert_eq!(position, &vec![1.0, 2.0]);
    assert_eq!(*weight, 3.0);
    assert!(current[Dim3::X] > 0.0);
    assert_eq!(current[Dim3::Y], 0.0);
    assert_eq!(current[Dim3::Z], 0.0);
}

#[test]
fn unlikely_ionization_deposits_zero_current() {
    let conversion = reference_conversion();
    let profile = element_profile("C", &conversion);
    let field_strength = 0.5;
    let rate = RateCoefficientTable::for_profile(&profile, conversion.au_to_w0)
        .unwrap()
        .rate(2, 1.0 / field_strength);
    let ionization = TunnelIonization::new(profile, &conversion, 0.01 / rate).unwrap();

    let mut ions = ions_with_charges(&[2]);
    let mut electrons = Particles::new(1);
    let mut projector = RecordingProjector::new();

    let statistics = ionization.ionize(
        &mut ions,
        0..1,
        &[field_with_strength(field_strength, &conversion)],
        &mut projector,
        &mut constant_draw_rng(0.5),
        &mut electrons,
    );

    assert_eq!(ions.charge(0), 2);
    assert!(electrons.is_empty());
    assert_eq!(statistics.n_processed_ions, 1);
    assert_eq!(statistics.n_ionized_ions, 0);
    assert_eq!(projector.deposits().len(), 1);
    assert!(projector.deposits()[0].2.is_zero());
}

#[test]
fn cascade_removes_exactly_the_traversed_electrons() {
    let dt = 1.0;
    let ionization = custom_tunnel_model(&[0.1, 0.2, 50.0, 60.0], 1e12, dt);
    let field = Vec3::new(0.6, 0.0, 0.8);

    let mut ions = ions_with_charges(&[0]);
    let mut electrons = Particles::new(1);
    let mut projector = RecordingProjector::new();

    let statistics = ionization.ionize(
        &mut ions,
        0..1,
        &[field],
        &mut projector,
        &mut constant_draw_rng(0.5),
        &mut electrons,
    );

    assert_eq!(ions.charge(0), 2);
    assert_eq!(statistics.n_liberated_electrons, 2);
    assert_eq!(electrons.len(), 1);
    assert_eq!(electrons.weight(0), 2.0);

    let au_to_mec2 = reference_conversion().au_to_mec2;
    let expected_current = field * (au_to_mec2 / dt * (0.1 + 0.2));
    assert_vectors_relative_eq(&projector.deposits()[0].2, &expected_current, 1e-12);
}

#[test]
fn cascade_at_moderate_rates_follows_sequential_decay() {
    let potentials = [0.5, 0.9, 1.5];
    let field_strength = 0.3;
    let r0 = RateCoefficientTable::new(&potentials, &[0; 3], 1.0)
        .unwrap()
        .rate(0, 1.0 / field_strength);
    let dt = 1.0 / r0;
    let ionization = custom_tunnel_model(&potentials, 1.0, dt);
    let field = Vec3::new(0.0, -field_strength, 0.0);

    // Survival probabilities are 0.368 at Z = 0 and 0.607 up to Z = 1
    for (draw, expected_ionizations, expected_potential) in
        [(0.3, 0, 0.0), (0.5, 1, 0.5), (0.8, 2, 0.5 + 0.9)]
    {
        let mut ions = ions_with_charges(&[0, 0]);
        let mut electrons = Particles::new(1);
        let mut projector = RecordingProjector::new();

        ionization.ionize(
            &mut ions,
            1..2,
            &[field, field],
            &mut projector,
            &mut constant_draw_rng(draw),
            &mut electrons,
        );

        assert_eq!(ions.charge(0), 0);
        assert_eq!(ions.charge(1), expected_ionizations);
        assert_eq!(projector.deposits().len(), 1);

        let au_to_mec2 = reference_conversion().au_to_mec2;
        let current = projector.deposits()[0].2;
        if expected_ionizations == 0 {
            assert!(current.is_zero());
            assert_eq!(electrons.len(), 0);
        } else {
            let expected_current = field
                * (au_to_mec2 / dt / (field_strength * field_strength) * expected_potential);
            assert_vectors_relative_eq(&current, &expected_current, 1e-12);
            assert_eq!(electrons.len(), 1);
            assert_eq!(electrons.weight(0), 2.0 * expected_ionizations as fpl);
        }
    }
}

#[test]
fn stripped_and_field_free_ions_are_skipped_without_drawing() {
    let ionization = tunnel_model_for_element("He", 0.1);
    let strong_field = field_with_strength(5.0, &reference_conversion());

    let mut ions = ions_with_charges(&[2, 0, 1]);
    let fields = [strong_field, Vec3::zero(), Vec3::zero()];
    let mut electrons = Particles::new(1);
    let mut projector = RecordingProjector::new();

    let mut rng = StdRng::seed_from_u64(5);
    let mut untouched_rng = rng.clone();

    let statistics = ionization.ionize(
        &mut ions,
        0..3,
        &fields,
        &mut projector,
        &mut rng,
        &mut electrons,
    );

    assert_eq!(ions.charges(), &[2, 0, 1]);
    assert!(electrons.is_empty());
    assert!(projector.deposits().is_empty());
    assert_eq!(statistics.n_processed_ions, 0);
    assert_eq!(rng.gen::<u64>(), untouched_rng.gen::<u64>());
}

#[test]
fn only_ions_in_range_are_processed() {
    let ionization = tunnel_model_for_element("He", 0.1);
    let strong_field = field_with_strength(5.0, &reference_conversion());

    let mut ions = ions_with_charges(&[0, 0, 0, 0]);
    let fields = vec![strong_field; 4];
    let mut electrons = Particles::new(1);
    let mut projector = RecordingProjector::new();

    let statistics = ionization.ionize(
        &mut ions,
        1..3,
        &fields,
        &mut projector,
        &mut StdRng::seed_from_u64(2),
        &mut electrons,
    );

    assert_eq!(statistics.n_processed_ions, 2);
    assert_eq!(ions.charge(0), 0);
    assert_eq!(ions.charge(3), 0);
    assert_eq!(projector.deposits().len(), 2);
    assert_eq!(projector.deposits()[0].0, vec![1.5]);
}

fn random_ions_and_fields(
    n_ions: usize,
    atomic_number: i32,
    seed: u64,
) -> (Particles, Vec<LocalFields>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let charges: Vec<i32> = (0..n_ions)
        .map(|_| rng.gen_range(0..=atomic_number))
        .collect();
    let conversion = reference_conversion();
    let fields = (0..n_ions)
        .map(|_| {
            let strength = rng.gen_range(0.0..4.0);
            let field = field_with_strength(strength, &conversion);
            Vec3::new(field[Dim3::X], -0.5 * field[Dim3::X], 0.25 * field[Dim3::X])
        })
        .collect();
    (ions_with_charges(&charges), fields)
}

fn liberated_electron_weight(initial_ions: &Particles, final_ions: &Particles) -> fpl {
    (0..initial_ions.len())
        .map(|idx| {
            let charge_increase = final_ions.charge(idx) - initial_ions.charge(idx);
            (charge_increase as fpl) * initial_ions.weight(idx)
        })
        .sum()
}

#[test]
fn spawned_electron_weight_matches_charge_increase() {
    let ionization = tunnel_model_for_element("O", 0.2);
    let (initial_ions, fields) = random_ions_and_fields(3000, 8, 17);

    for parallel in [false, true] {
        let mut ions = initial_ions.clone();
        let mut electrons = Particles::new(1);
        let mut projector = RecordingProjector::new();
        let mut rng = StdRng::seed_from_u64(23);
        let range = 0..ions.len();

        let statistics = if parallel {
            ionization.par_ionize(
                &mut ions,
                range,
                &fields,
                &mut projector,
                &mut rng,
                &mut electrons,
            )
        } else {
            ionization.ionize(
                &mut ions,
                range,
                &fields,
                &mut projector,
                &mut rng,
                &mut electrons,
            )
        };

        let expected_weight = liberated_electron_weight(&initial_ions, &ions);
        assert!(expected_weight > 0.0);
        assert_relative_eq!(
            electrons.total_weight(),
            expected_weight,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            statistics.liberated_electron_weight,
            expected_weight,
            max_relative = 1e-12
        );
        assert_eq!(electrons.len(), statistics.n_ionized_ions);
        assert!(electrons.charges().iter().all(|&charge| charge == ELECTRON_CHARGE));
        assert!(ions.charges().iter().all(|&charge| (0..=8).contains(&charge)));
        for idx in 0..ions.len() {
            assert!(ions.charge(idx) >= initial_ions.charge(idx));
        }
    }
}

#[test]
fn parallel_ionization_is_reproducible_for_seeded_generator() {
    let ionization = tunnel_model_for_element("Ne", 0.2);
    let (initial_ions, fields) = random_ions_and_fields(5000, 10, 8);

    let run = || {
        let mut ions = initial_ions.clone();
        let mut electrons = Particles::new(1);
        let mut projector = RecordingProjector::new();
        let statistics = ionization.par_ionize(
            &mut ions,
            0..5000,
            &fields,
            &mut projector,
            &mut StdRng::seed_from_u64(99),
            &mut electrons,
        );
        (ions, electrons, projector.deposits().to_vec(), statistics)
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);

    // Deposits arrive in particle order
    let positions: Vec<fpl> = first.2.iter().map(|(position, _, _)| position[0]).collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn last_electron_is_removed_with_expected_probability() {
    let conversion = reference_conversion();
    let field_strength = 0.06;
    let profile = element_profile("H", &conversion);
    let rate = RateCoefficientTable::for_profile(&profile, conversion.au_to_w0)
        .unwrap()
        .rate(0, 1.0 / field_strength);
    // Gives an ionization probability of one half per step
    let ionization = TunnelIonization::new(profile, &conversion, fpl::ln(2.0) / rate).unwrap();

    let n_ions = 20_000;
    let fields = vec![field_with_strength(field_strength, &conversion); n_ions];

    for parallel in [false, true] {
        let mut ions = ions_with_charges(&vec![0; n_ions]);
        let mut electrons = Particles::new(1);
        let mut projector = RecordingProjector::new();
        let mut rng = StdRng::seed_from_u64(4);
        let statistics = if parallel {
            ionization.par_ionize(
                &mut ions,
                0..n_ions,
                &fields,
                &mut projector,
                &mut rng,
                &mut electrons,
            )
        } else {
            ionization.ionize(
                &mut ions,
                0..n_ions,
                &fields,
                &mut projector,
                &mut rng,
                &mut electrons,
            )
        };
        let ionized_fraction = statistics.n_ionized_ions as fpl / n_ions as fpl;
        assert!(
            (ionized_fraction - 0.5).abs() < 0.02,
            "Ionized fraction {} too far from one half",
            ionized_fraction
        );
    }
}

#[test]
fn grid_deposition_receives_weighted_ionization_current() {
    let ionization = tunnel_model_for_element("C", 0.1);
    let (initial_ions, fields) = random_ions_and_fields(400, 6, 12);
    let grid = RegularGrid::new(&[41], &[0.0], &[400.0]).unwrap();

    let mut recorded_ions = initial_ions.clone();
    let mut recording_projector = RecordingProjector::new();
    ionization.ionize(
        &mut recorded_ions,
        0..400,
        &fields,
        &mut recording_projector,
        &mut StdRng::seed_from_u64(6),
        &mut Particles::new(1),
    );

    let mut deposited_ions = initial_ions.clone();
    let mut currents = CurrentDensity::zeros(&grid);
    ionization.ionize(
        &mut deposited_ions,
        0..400,
        &fields,
        &mut LinearProjector::new(&grid, &mut currents),
        &mut StdRng::seed_from_u64(6),
        &mut Particles::new(1),
    );

    assert_eq!(recorded_ions, deposited_ions);
    let expected = recording_projector.total_weighted_current();
    assert!(expected[Dim3::X] > 0.0);
    assert_vectors_relative_eq(&currents.totals(), &expected, 1e-10);
}

#[test]
fn disabled_ionization_leaves_everything_untouched() {
    let conversion = reference_conversion();
    let ionization = SpeciesIonization::new(
        IonizationModelType::None,
        element_profile("Ar", &conversion),
        &conversion,
        0.1,
    )
    .unwrap();
    let (initial_ions, fields) = random_ions_and_fields(100, 18, 1);

    let mut ions = initial_ions.clone();
    let mut electrons = Particles::new(1);
    let mut projector = RecordingProjector::new();
    let statistics = ionization.par_ionize(
        &mut ions,
        0..100,
        &fields,
        &mut projector,
        &mut StdRng::seed_from_u64(0),
        &mut electrons,
    );

    assert_eq!(ions, initial_ions);
    assert!(electrons.is_empty());
    assert!(projector.deposits().is_empty());
    assert_eq!(statistics.n_processed_ions, 0);
}
