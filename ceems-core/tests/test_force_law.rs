//! Unit tests for the power-law central force

use ceems_core::engine::{power_law_force, ForceParameters};
use ceems_core::tests::test_helpers::{approx_eq, approx_eq_vec};
use glam::DVec2;

#[test]
fn test_inverse_square_force() {
    let force = ForceParameters::new(1.0, -2.0);
    let f = force.force(DVec2::new(3.0, 4.0), DVec2::ZERO);

    // |r| = 5, F = k * 5^-3 * (3, 4)
    assert!(approx_eq_vec(f, DVec2::new(3.0, 4.0) / 125.0, 1e-15));
    assert!(approx_eq(f.length(), 1.0 / 25.0, 1e-15));
}

#[test]
fn test_linear_force() {
    let f = power_law_force(DVec2::new(1.0, 2.0), DVec2::new(-1.0, 0.5), 3.0, 1.0);

    // p = 1 gives a spring-like k * (r1 - r2)
    assert!(approx_eq_vec(f, DVec2::new(6.0, 4.5), 1e-14));
}

#[test]
fn test_force_is_antisymmetric() {
    let force = ForceParameters::new(0.7, -1.3);
    let r1 = DVec2::new(0.3, -1.2);
    let r2 = DVec2::new(-2.0, 0.4);

    let f12 = force.force(r1, r2);
    let f21 = force.force(r2, r1);
    assert!(approx_eq_vec(f12, -f21, 1e-15));
}

#[test]
fn test_force_magnitude_follows_power_law() {
    let force = ForceParameters::new(2.0, 0.5);
    for d in [0.25, 1.0, 3.0, 10.0] {
        let f = force.force(DVec2::new(d, 0.0), DVec2::ZERO);
        assert!(
            approx_eq(f.length(), 2.0 * d.powf(0.5), 1e-12),
            "|F| should be k * d^p at d = {}",
            d
        );
    }
}

#[test]
fn test_force_direction_along_separation() {
    let r1 = DVec2::new(1.0, 1.0);
    let r2 = DVec2::new(-2.0, 5.0);
    let f = power_law_force(r1, r2, 1.0, -2.0);

    // Points from body 2 to body 1 for k > 0; the integrator applies the minus sign
    assert!(approx_eq(f.normalize().dot((r1 - r2).normalize()), 1.0, 1e-12));

    let repulsive = power_law_force(r1, r2, -1.0, -2.0);
    assert!(approx_eq(repulsive.normalize().dot((r1 - r2).normalize()), -1.0, 1e-12));
}

#[test]
fn test_coincident_bodies_are_singular() {
    let f = power_law_force(DVec2::new(1.0, 1.0), DVec2::new(1.0, 1.0), 1.0, -2.0);
    assert!(!f.is_finite());
}
