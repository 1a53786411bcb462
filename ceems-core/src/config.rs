//! Run configuration loaded from TOML.
//!
//! Every section is optional; missing values fall back to the defaults below.
//!
//! ```toml
//! [bodies]
//! m1 = 0.5
//! m2 = 1.0
//!
//! [force]
//! k = 1.0        # F = k * r^p
//! p = -2.0
//!
//! [integration]
//! dt = 0.01
//! duration = 50.0   # or: steps = 5000
//!
//! [transform]
//! model = "newtonian"    # "random", "non-gravitational", or 1 / 2 / 3
//! # effective_mass = 0.4 # random model only; drawn from `seed` when absent
//! seed = 7
//!
//! [initial_conditions]
//! kind = "circular"
//! r1 = [2.0, 0.0]
//! ```

use crate::engine::{ForceParameters, TwoBodySystem};
use crate::error::{CeemsError, Result};
use crate::initial::InitialConditions;
use crate::transform::{Model, ModelKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BodiesConfig {
    pub m1: f64,
    pub m2: f64,
}

impl Default for BodiesConfig {
    fn default() -> Self {
        Self { m1: 1.0, m2: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForceConfig {
    pub k: f64,
    pub p: f64,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self { k: 1.0, p: -2.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationConfig {
    pub dt: f64,
    /// Total simulated time; ignored when `steps` is given
    pub duration: f64,
    pub steps: Option<usize>,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            duration: 50.0,
            steps: None,
        }
    }
}

/// Model given either by number or by name
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModelSelector {
    Number(i64),
    Name(String),
}

impl ModelSelector {
    pub fn kind(&self) -> Result<ModelKind> {
        match self {
            Self::Number(n) => ModelKind::from_number(*n),
            Self::Name(name) => name.parse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    pub model: ModelSelector,
    pub effective_mass: Option<f64>,
    pub seed: u64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            model: ModelSelector::Number(3),
            effective_mass: None,
            seed: 0,
        }
    }
}

/// Complete description of a run
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub bodies: BodiesConfig,
    pub force: ForceConfig,
    pub integration: IntegrationConfig,
    pub transform: TransformConfig,
    pub initial_conditions: InitialConditions,
}

impl SimulationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reject values that would make any later stage meaningless
    pub fn validate(&self) -> Result<()> {
        let BodiesConfig { m1, m2 } = self.bodies;
        for (label, mass) in [("m1", m1), ("m2", m2)] {
            if !(mass > 0.0 && mass.is_finite()) {
                return Err(CeemsError::invalid(format!(
                    "{} must be a positive finite mass, got {}",
                    label, mass
                )));
            }
        }
        if !(self.force.k.is_finite() && self.force.p.is_finite()) {
            return Err(CeemsError::invalid(format!(
                "force parameters must be finite, got k = {}, p = {}",
                self.force.k, self.force.p
            )));
        }
        let dt = self.integration.dt;
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(CeemsError::invalid(format!(
                "dt must be positive and finite, got {}",
                dt
            )));
        }
        if self.integration.steps.is_none() && !(self.integration.duration.is_finite()) {
            return Err(CeemsError::invalid(format!(
                "duration must be finite, got {}",
                self.integration.duration
            )));
        }
        if self.n_steps() == 0 {
            return Err(CeemsError::invalid(
                "the run must contain at least one step (check duration and dt)",
            ));
        }
        if let Some(a) = self.transform.effective_mass {
            if a.is_nan() {
                return Err(CeemsError::invalid("effective_mass must be a number"));
            }
        }
        self.transform.model.kind()?;
        Ok(())
    }

    pub fn force_parameters(&self) -> ForceParameters {
        ForceParameters::new(self.force.k, self.force.p)
    }

    pub fn dt(&self) -> f64 {
        self.integration.dt
    }

    /// `steps` if given, otherwise `floor(duration / dt)`
    pub fn n_steps(&self) -> usize {
        match self.integration.steps {
            Some(steps) => steps,
            None => {
                let steps = (self.integration.duration / self.integration.dt).floor();
                if steps.is_finite() && steps > 0.0 {
                    steps as usize
                } else {
                    0
                }
            }
        }
    }

    /// Resolve the model, drawing `A` from the transform seed for the random model
    pub fn model(&self) -> Result<Model> {
        Ok(match self.transform.model.kind()? {
            ModelKind::RandomEquivalentEqualMass => match self.transform.effective_mass {
                Some(effective_mass) => Model::RandomEquivalentEqualMass { effective_mass },
                None => {
                    let mut rng = StdRng::seed_from_u64(self.transform.seed);
                    Model::random_equivalent(&mut rng)
                }
            },
            ModelKind::NonGravitationalCentral => Model::NonGravitationalCentral,
            ModelKind::NewtonianGravity => Model::NewtonianGravity,
        })
    }

    pub fn initial_system(&self) -> Result<TwoBodySystem> {
        self.initial_conditions
            .build(self.bodies.m1, self.bodies.m2, &self.force_parameters())
    }
}
