//! Tests for the RK4 step

use ceems_core::engine::{Body, ForceParameters, TwoBodySystem};
use ceems_core::integrator::step;
use ceems_core::tests::test_helpers::{approx_eq, eccentric_system, gravity};
use glam::DVec2;

/// Two bodies at rest joined by a unit linear force: r1(t) = cos(sqrt(2) t) * (1, 0)
fn oscillator() -> (TwoBodySystem, ForceParameters) {
    let system = TwoBodySystem::new(
        Body::new(1.0, DVec2::new(1.0, 0.0), DVec2::ZERO),
        Body::new(1.0, DVec2::new(-1.0, 0.0), DVec2::ZERO),
    );
    (system, ForceParameters::new(1.0, 1.0))
}

fn oscillator_error(dt: f64, t_end: f64) -> f64 {
    let (mut system, force) = oscillator();
    let n = (t_end / dt).round() as usize;
    for _ in 0..n {
        step(&mut system, &force, dt);
    }
    let expected = (2f64.sqrt() * n as f64 * dt).cos();
    (system.b1.pos.x - expected).abs()
}

#[test]
fn test_momentum_conserved_every_step() {
    let mut system = eccentric_system(0.5, 1.0);
    let force = gravity();
    let p0 = system.total_momentum();
    let scale = system.b1.momentum().length() + system.b2.momentum().length();

    for i in 0..3000 {
        step(&mut system, &force, 0.01);
        let drift = (system.total_momentum() - p0).length();
        assert!(
            drift <= 1e-9 * scale,
            "momentum drifted by {:.3e} at step {}",
            drift,
            i
        );
    }
}

#[test]
fn test_momentum_conserved_for_very_unequal_masses() {
    let mut system = TwoBodySystem::new(
        Body::new(1e-3, DVec2::new(1.0, 0.0), DVec2::new(0.0, 3.0)),
        Body::new(50.0, DVec2::new(0.0, 0.0), DVec2::new(0.01, 0.0)),
    );
    let force = ForceParameters::new(2.0, 1.5);
    let p0 = system.total_momentum();

    for _ in 0..1000 {
        step(&mut system, &force, 0.001);
    }
    assert!((system.total_momentum() - p0).length() <= 1e-9 * p0.length());
}

#[test]
fn test_center_of_mass_moves_uniformly() {
    let mut system = eccentric_system(1.0, 2.0);
    let force = gravity();
    let com0 = system.center_of_mass();
    let v_com = system.total_momentum() / system.total_mass();
    let dt = 0.005;

    for _ in 0..2000 {
        step(&mut system, &force, dt);
    }
    let expected = com0 + v_com * (2000.0 * dt);
    assert!(system.center_of_mass().distance(expected) < 1e-10);
}

#[test]
fn test_matches_harmonic_solution() {
    let error = oscillator_error(0.01, 1.0);
    assert!(error < 2e-9, "RK4 error {:.3e} too large", error);
}

#[test]
fn test_fourth_order_convergence() {
    let coarse = oscillator_error(0.1, 2.0);
    let fine = oscillator_error(0.05, 2.0);

    // Halving dt should shrink the global error by roughly 2^4
    let ratio = coarse / fine;
    assert!(
        ratio > 10.0 && ratio < 24.0,
        "error ratio {:.2} not consistent with fourth order",
        ratio
    );
}

#[test]
fn test_step_keeps_masses() {
    let mut system = eccentric_system(0.5, 1.0);
    step(&mut system, &gravity(), 0.01);
    assert_eq!(system.b1.mass, 0.5);
    assert_eq!(system.b2.mass, 1.0);
}

#[test]
fn test_attractive_force_pulls_bodies_together() {
    let mut system = TwoBodySystem::new(
        Body::new(1.0, DVec2::new(1.0, 0.0), DVec2::ZERO),
        Body::new(1.0, DVec2::new(-1.0, 0.0), DVec2::ZERO),
    );
    let before = system.separation();
    step(&mut system, &gravity(), 0.01);
    assert!(system.separation() < before);
    assert!(approx_eq(system.b1.pos.y, 0.0, 1e-15));
}
