//! Tests for the initial-condition strategies

use ceems_core::engine::ForceParameters;
use ceems_core::initial::{circular_orbit, random_start, InitialConditions};
use ceems_core::tests::test_helpers::{approx_eq, approx_eq_vec, gravity};
use ceems_core::CeemsError;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_circular_orbit_matches_reference_formula() {
    let m1 = 0.4;
    let m2 = 1.0;
    let system = circular_orbit(DVec2::new(2.0, 0.0), m1, m2, &gravity()).unwrap();

    // r2 = -r1 m1/m2, v1 = sqrt(2/m1 * |r1 - r2|^p) * (0, 1)
    assert!(approx_eq_vec(system.b2.pos, DVec2::new(-0.8, 0.0), 1e-15));
    let separation: f64 = 2.8;
    let speed = (2.0 / m1 * separation.powf(-2.0)).sqrt();
    assert!(approx_eq_vec(system.b1.vel, DVec2::new(0.0, speed), 1e-14));
    assert!(approx_eq_vec(system.b2.vel, DVec2::new(0.0, -speed * m1 / m2), 1e-14));
}

#[test]
fn test_circular_orbit_has_zero_momentum_and_centred_mass() {
    let system = circular_orbit(DVec2::new(0.3, -1.1), 2.0, 0.7, &gravity()).unwrap();
    assert!(system.total_momentum().length() < 1e-14);
    assert!(system.center_of_mass().length() < 1e-14);
    // Velocity is perpendicular to the radius vector
    assert!(approx_eq(system.b1.vel.dot(system.b1.pos), 0.0, 1e-14));
}

#[test]
fn test_circular_orbit_needs_attraction() {
    let err = circular_orbit(DVec2::new(2.0, 0.0), 1.0, 1.0, &ForceParameters::new(-1.0, -2.0))
        .unwrap_err();
    assert!(matches!(err, CeemsError::InvalidConfiguration { .. }));

    let err = circular_orbit(DVec2::ZERO, 1.0, 1.0, &gravity()).unwrap_err();
    assert!(matches!(err, CeemsError::InvalidConfiguration { .. }));
}

#[test]
fn test_random_start_is_centred_and_bounded() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let system = random_start(&mut rng, 0.6, 1.0).unwrap();
        assert!(system.b1.pos.abs().max_element() <= 0.5);
        assert!(system.b1.vel.abs().max_element() <= 2.5);
        assert!(system.total_momentum().length() < 1e-14);
        assert!(system.center_of_mass().length() < 1e-14);
    }
}

#[test]
fn test_random_strategy_is_reproducible() {
    let strategy = InitialConditions::Random { seed: 42 };
    let a = strategy.build(0.5, 1.0, &gravity()).unwrap();
    let b = strategy.build(0.5, 1.0, &gravity()).unwrap();
    assert_eq!(a, b);

    let other = InitialConditions::Random { seed: 43 }
        .build(0.5, 1.0, &gravity())
        .unwrap();
    assert_ne!(a, other);
}

#[test]
fn test_explicit_strategy_checks_masses() {
    let strategy = InitialConditions::Explicit {
        r1: [1.0, 0.0],
        v1: [0.0, 1.0],
        r2: [-1.0, 0.0],
        v2: [0.0, -1.0],
    };
    assert!(strategy.build(1.0, 1.0, &gravity()).is_ok());
    assert!(matches!(
        strategy.build(-1.0, 1.0, &gravity()),
        Err(CeemsError::InvalidConfiguration { .. })
    ));
}
