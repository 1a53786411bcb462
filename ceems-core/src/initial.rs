//! Initial-condition strategies for the two-body problem
//!
//! Both generated strategies place the centre of mass at the origin and give
//! the system zero total momentum.

use crate::engine::{Body, ForceParameters, TwoBodySystem};
use crate::error::{CeemsError, Result};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InitialConditions {
    /// Circular orbit with body 1 starting at `r1`
    Circular { r1: [f64; 2] },
    /// Random start, scaled to look reasonable on average
    Random { seed: u64 },
    /// Positions and velocities given as-is
    Explicit {
        r1: [f64; 2],
        v1: [f64; 2],
        r2: [f64; 2],
        v2: [f64; 2],
    },
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self::Circular { r1: [2.0, 0.0] }
    }
}

impl InitialConditions {
    pub fn build(&self, m1: f64, m2: f64, force: &ForceParameters) -> Result<TwoBodySystem> {
        match self {
            Self::Circular { r1 } => circular_orbit(DVec2::from(*r1), m1, m2, force),
            Self::Random { seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                random_start(&mut rng, m1, m2)
            }
            Self::Explicit { r1, v1, r2, v2 } => TwoBodySystem::try_new(
                Body::new(m1, DVec2::from(*r1), DVec2::from(*v1)),
                Body::new(m2, DVec2::from(*r2), DVec2::from(*v2)),
            ),
        }
    }
}

/// Mirror body 1 through the centre of mass: `x2 = -x1 * m1 / m2`
fn mirrored(x1: DVec2, m1: f64, m2: f64) -> DVec2 {
    -x1 * m1 / m2
}

/// Circular orbit about the origin.
///
/// Body 1 moves along the left-hand perpendicular of `r1` with the speed that
/// balances the central force, `m1 v1^2 / |r1| = k |r1 - r2|^p`.
pub fn circular_orbit(r1: DVec2, m1: f64, m2: f64, force: &ForceParameters) -> Result<TwoBodySystem> {
    if force.k <= 0.0 {
        return Err(CeemsError::invalid(format!(
            "circular orbits need an attractive force (k > 0), got k = {}",
            force.k
        )));
    }
    if r1.length_squared() == 0.0 {
        return Err(CeemsError::invalid(
            "circular orbit needs body 1 away from the centre of mass",
        ));
    }

    let r2 = mirrored(r1, m1, m2);
    let separation = r1.distance(r2);
    let speed = (force.k * r1.length() / m1 * separation.powf(force.p)).sqrt();
    let v1 = r1.perp().normalize() * speed;
    let v2 = mirrored(v1, m1, m2);

    TwoBodySystem::try_new(Body::new(m1, r1, v1), Body::new(m2, r2, v2))
}

/// Random positions in the unit square and velocities in a 5x5 box, both centred at zero
pub fn random_start<R: Rng + ?Sized>(rng: &mut R, m1: f64, m2: f64) -> Result<TwoBodySystem> {
    let mut centred = |scale: f64| {
        DVec2::new(rng.random::<f64>() - 0.5, rng.random::<f64>() - 0.5) * scale
    };
    let r1 = centred(1.0);
    let v1 = centred(5.0);

    TwoBodySystem::try_new(
        Body::new(m1, r1, v1),
        Body::new(m2, mirrored(r1, m1, m2), mirrored(v1, m1, m2)),
    )
}
