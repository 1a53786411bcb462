//! Test helper utilities for CEEMS tests

use crate::engine::{Body, ForceParameters, TwoBodySystem};
use crate::initial::circular_orbit;
use crate::runtime::Trajectory;
use glam::DVec2;

/// Check if two floating point values are approximately equal within tolerance
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Check if two vectors are approximately equal component-wise
pub fn approx_eq_vec(a: DVec2, b: DVec2, tol: f64) -> bool {
    approx_eq(a.x, b.x, tol) && approx_eq(a.y, b.y, tol)
}

/// Largest point-wise distance between two trajectories
pub fn max_distance(a: &Trajectory, b: &Trajectory) -> f64 {
    a.distances_to(b).into_iter().fold(0.0_f64, f64::max)
}

/// Inverse-square attraction with unit coupling
pub fn gravity() -> ForceParameters {
    ForceParameters::new(1.0, -2.0)
}

/// Circular orbit with body 1 starting at (2, 0), as in the reference scenario
pub fn circular_system(m1: f64, m2: f64, force: &ForceParameters) -> TwoBodySystem {
    circular_orbit(DVec2::new(2.0, 0.0), m1, m2, force).expect("valid circular orbit")
}

/// An eccentric bound orbit with non-zero total momentum
pub fn eccentric_system(m1: f64, m2: f64) -> TwoBodySystem {
    TwoBodySystem::new(
        Body::new(m1, DVec2::new(1.0, 0.2), DVec2::new(0.1, 0.45)),
        Body::new(m2, DVec2::new(-0.8, -0.1), DVec2::new(0.05, -0.3)),
    )
}
