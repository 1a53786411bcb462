//! Decoupling transform for the two-body power-law problem
//!
//! Maps the pair of coupled positions `(r1, r2)` onto two coordinates
//! `ra = alpha1*r1 + alpha2*r2` and `rb = beta1*r1 + beta2*r2`, each of which
//! evolves like a body of mass `A` under the same power law with the rescaled
//! coupling `k_new = k / gamma^(p+1)`.

use crate::engine::{Body, ForceParameters, TwoBodySystem};
use crate::error::{CeemsError, Result};
use glam::DVec2;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How the effective mass `A` of the reduced bodies is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Model {
    /// Caller-supplied `A`, unrelated to the physical masses
    RandomEquivalentEqualMass { effective_mass: f64 },
    /// `A = 2 * mu`
    NonGravitationalCentral,
    /// `A = 2^0.2 * Mc`, with `Mc` the chirp mass
    NewtonianGravity,
}

impl Model {
    /// Draw `A` uniformly from (0, 1)
    pub fn random_equivalent<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::RandomEquivalentEqualMass {
            effective_mass: rng.random_range(f64::MIN_POSITIVE..1.0),
        }
    }

    /// Selector number of the model (1, 2, 3)
    pub fn number(&self) -> u8 {
        match self {
            Self::RandomEquivalentEqualMass { .. } => 1,
            Self::NonGravitationalCentral => 2,
            Self::NewtonianGravity => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RandomEquivalentEqualMass { .. } => "random-equivalent",
            Self::NonGravitationalCentral => "non-gravitational",
            Self::NewtonianGravity => "newtonian",
        }
    }

    /// Effective mass `A` for a pair with reduced mass `mu` and total mass `total`
    pub fn effective_mass(&self, mu: f64, total: f64) -> f64 {
        match *self {
            Self::RandomEquivalentEqualMass { effective_mass } => effective_mass,
            Self::NonGravitationalCentral => 2.0 * mu,
            Self::NewtonianGravity => 2f64.powf(0.2) * chirp_mass(mu, total),
        }
    }
}

/// Which model a selector names, before the random model receives its `A`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    RandomEquivalentEqualMass,
    NonGravitationalCentral,
    NewtonianGravity,
}

impl ModelKind {
    pub fn from_number(number: i64) -> Result<Self> {
        match number {
            1 => Ok(Self::RandomEquivalentEqualMass),
            2 => Ok(Self::NonGravitationalCentral),
            3 => Ok(Self::NewtonianGravity),
            other => Err(CeemsError::invalid(format!(
                "unknown model selector {} (expected 1, 2 or 3)",
                other
            ))),
        }
    }
}

impl FromStr for ModelKind {
    type Err = CeemsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "random" | "random-equivalent" | "random-equivalent-equal-mass" => {
                Ok(Self::RandomEquivalentEqualMass)
            }
            "2" | "non-gravitational" | "non-gravitational-central" | "central" => {
                Ok(Self::NonGravitationalCentral)
            }
            "3" | "newtonian" | "newtonian-gravity" | "gravity" => Ok(Self::NewtonianGravity),
            other => Err(CeemsError::invalid(format!("unknown model selector '{}'", other))),
        }
    }
}

/// `Mc = mu^0.6 * M^0.4`
pub fn chirp_mass(mu: f64, total: f64) -> f64 {
    mu.powf(0.6) * total.powf(0.4)
}

/// Coefficients of the decoupling transform and the rescaled coupling
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformationParameters {
    pub model: Model,
    pub m1: f64,
    pub m2: f64,
    pub p: f64,
    pub k: f64,
    /// Effective mass `A` of both reduced bodies
    pub a: f64,
    pub alpha1: f64,
    pub alpha2: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub gamma: f64,
    /// Determinant `J = alpha1*beta2 - alpha2*beta1`
    pub jacobian: f64,
    pub k_new: f64,
}

impl TransformationParameters {
    /// Map original coordinates to `(ra, rb)`. Applies equally to velocities.
    pub fn forward(&self, x1: DVec2, x2: DVec2) -> (DVec2, DVec2) {
        (
            x1 * self.alpha1 + x2 * self.alpha2,
            x1 * self.beta1 + x2 * self.beta2,
        )
    }

    /// Recover original coordinates from `(ra, rb)`
    pub fn inverse(&self, xa: DVec2, xb: DVec2) -> (DVec2, DVec2) {
        (
            (xa * self.beta2 - xb * self.alpha2) / self.jacobian,
            -(xa * self.beta1 - xb * self.alpha1) / self.jacobian,
        )
    }

    /// Force law felt by the reduced bodies
    pub fn reduced_force(&self) -> ForceParameters {
        ForceParameters::new(self.k_new, self.p)
    }

    /// Initial state of the reduced system, both bodies carrying mass `A`
    pub fn reduced_system(&self, original: &TwoBodySystem) -> TwoBodySystem {
        let (ra, rb) = self.forward(original.b1.pos, original.b2.pos);
        let (va, vb) = self.forward(original.b1.vel, original.b2.vel);
        TwoBodySystem::new(Body::new(self.a, ra, va), Body::new(self.a, rb, vb))
    }
}

impl fmt::Display for TransformationParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Model:{} ({}), m1={:.2}, m2={:.2}, p={:.2}, A={:.2}",
            self.model.number(),
            self.model.name(),
            self.m1,
            self.m2,
            self.p,
            self.a
        )?;
        writeln!(f, "  alpha1 = {:+.6}  alpha2 = {:+.6}", self.alpha1, self.alpha2)?;
        writeln!(f, "  beta1  = {:+.6}  beta2  = {:+.6}", self.beta1, self.beta2)?;
        write!(
            f,
            "  gamma  = {:.6}  J = {:+.6}  k_new = {:.6}",
            self.gamma, self.jacobian, self.k_new
        )
    }
}

/// Derive the decoupling transform for masses `m1`, `m2` under `F = k * r^p`
pub fn derive(m1: f64, m2: f64, p: f64, k: f64, model: Model) -> Result<TransformationParameters> {
    for (label, mass) in [("m1", m1), ("m2", m2)] {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(CeemsError::invalid(format!(
                "{} must be a positive finite mass, got {}",
                label, mass
            )));
        }
    }

    let total = m1 + m2;
    let mu = m1 * m2 / total;
    let a = model.effective_mass(mu, total);
    if a.is_nan() || a == 0.0 {
        return Err(CeemsError::invalid(format!(
            "effective mass A must be a non-zero number, got {}",
            a
        )));
    }

    let gamma = scale_factor(mu, a)?;
    let [alpha1, alpha2, beta1, beta2] = decoupling_coefficients(m1, m2, a, gamma)?;
    let jacobian = jacobian(alpha1, alpha2, beta1, beta2)?;
    let k_new = k / gamma.powf(p + 1.0);

    tracing::debug!(
        model = model.name(),
        a,
        gamma,
        jacobian,
        k_new,
        "derived decoupling transform"
    );

    Ok(TransformationParameters {
        model,
        m1,
        m2,
        p,
        k,
        a,
        alpha1,
        alpha2,
        beta1,
        beta2,
        gamma,
        jacobian,
        k_new,
    })
}

/// `gamma = sqrt(2 * mu / A)`
fn scale_factor(mu: f64, a: f64) -> Result<f64> {
    let radicand = 2.0 * mu / a;
    if radicand < 0.0 {
        return Err(CeemsError::Domain {
            quantity: "gamma",
            radicand,
        });
    }
    Ok(radicand.sqrt())
}

/// Solve `gamma^2/4 + beta^2 -/+ gamma*beta = m_i/(2A)` on the branch that keeps
/// `alpha1 - beta1 = gamma` and `alpha2 - beta2 = -gamma`.
///
/// Returns `[alpha1, alpha2, beta1, beta2]`.
pub(crate) fn decoupling_coefficients(m1: f64, m2: f64, a: f64, gamma: f64) -> Result<[f64; 4]> {
    let half_gamma = gamma / 2.0;
    let root = |quantity: &'static str, mass: f64| -> Result<f64> {
        let radicand = mass / (2.0 * a) - gamma * gamma / 4.0;
        if radicand < 0.0 {
            return Err(CeemsError::Domain { quantity, radicand });
        }
        Ok(radicand.sqrt())
    };

    let beta1 = -half_gamma - root("beta1", m1)?;
    let beta2 = half_gamma - root("beta2", m2)?;
    let alpha1 = beta1 + gamma;
    let alpha2 = beta2 - gamma;

    Ok([alpha1, alpha2, beta1, beta2])
}

/// Determinant of the alpha/beta map; zero means `ra` and `rb` are not independent
pub fn jacobian(alpha1: f64, alpha2: f64, beta1: f64, beta2: f64) -> Result<f64> {
    let jacobian = alpha1 * beta2 - alpha2 * beta1;
    if jacobian == 0.0 {
        return Err(CeemsError::DegenerateTransform {
            alpha1,
            alpha2,
            beta1,
            beta2,
            jacobian,
        });
    }
    Ok(jacobian)
}
