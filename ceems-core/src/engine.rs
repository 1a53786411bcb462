use glam::DVec2;
use serde::Serialize;

use crate::error::{CeemsError, Result};

/// A point mass in the two-body simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Body {
    pub mass: f64,
    pub pos: DVec2,
    pub vel: DVec2,
}

impl Body {
    pub fn new(mass: f64, pos: DVec2, vel: DVec2) -> Self {
        Self { mass, pos, vel }
    }

    pub fn momentum(&self) -> DVec2 {
        self.vel * self.mass
    }
}

/// Coupling constant and exponent of the power-law central force `F = k * r^p`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForceParameters {
    pub k: f64,
    pub p: f64,
}

impl ForceParameters {
    pub fn new(k: f64, p: f64) -> Self {
        Self { k, p }
    }

    /// Force on a body at `r1` due to a body at `r2`.
    ///
    /// Evaluates `k * |r1 - r2|^(p-1) * (r1 - r2)`. The reaction on the body at `r2`
    /// is the caller's business. Coincident positions give a non-finite result.
    pub fn force(&self, r1: DVec2, r2: DVec2) -> DVec2 {
        power_law_force(r1, r2, self.k, self.p)
    }
}

/// Power-law central force on body 1 due to body 2
pub fn power_law_force(r1: DVec2, r2: DVec2, k: f64, p: f64) -> DVec2 {
    let r = r1 - r2;
    r * (k * r.length().powf(p - 1.0))
}

/// An ordered pair of bodies linked by Newton's third law
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TwoBodySystem {
    pub b1: Body,
    pub b2: Body,
}

impl TwoBodySystem {
    pub fn new(b1: Body, b2: Body) -> Self {
        Self { b1, b2 }
    }

    /// Build a system after checking that both masses are strictly positive
    pub fn try_new(b1: Body, b2: Body) -> Result<Self> {
        for (label, mass) in [("m1", b1.mass), ("m2", b2.mass)] {
            if !(mass > 0.0 && mass.is_finite()) {
                return Err(CeemsError::invalid(format!(
                    "{} must be a positive finite mass, got {}",
                    label, mass
                )));
            }
        }
        Ok(Self { b1, b2 })
    }

    pub fn total_mass(&self) -> f64 {
        self.b1.mass + self.b2.mass
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.b1.momentum() + self.b2.momentum()
    }

    pub fn separation(&self) -> f64 {
        self.b1.pos.distance(self.b2.pos)
    }

    pub fn center_of_mass(&self) -> DVec2 {
        (self.b1.pos * self.b1.mass + self.b2.pos * self.b2.mass) / self.total_mass()
    }

    pub fn is_finite(&self) -> bool {
        self.b1.pos.is_finite()
            && self.b1.vel.is_finite()
            && self.b2.pos.is_finite()
            && self.b2.vel.is_finite()
    }

    /// Acceleration of the first body for the given positions
    pub fn acceleration_of_first(&self, r1: DVec2, r2: DVec2, force: &ForceParameters) -> DVec2 {
        -force.force(r1, r2) / self.b1.mass
    }

    /// Acceleration of the second body, derived from the first body's so the
    /// momentum change of the pair cancels exactly
    pub fn reaction_acceleration(&self, a1: DVec2) -> DVec2 {
        -a1 * (self.b1.mass / self.b2.mass)
    }
}
