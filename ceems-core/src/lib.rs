pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod initial;
pub mod integrator;
pub mod runtime;
pub mod transform;
pub mod validation;

pub use config::SimulationConfig;
pub use engine::{power_law_force, Body, ForceParameters, TwoBodySystem};
pub use error::{CeemsError, Result};
pub use initial::InitialConditions;
pub use runtime::{
    simulate, simulate_bodies, simulate_with_observer, NoProgress, SimulationRun, StepObserver,
    Trajectory,
};
pub use transform::{derive, Model, ModelKind, TransformationParameters};
pub use validation::{validate, validate_with_observer, ValidationReport};

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
