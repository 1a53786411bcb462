//! Round-trip check of the decoupling transform
//!
//! The original system and its reduced image are integrated independently,
//! the reduced trajectories are mapped back through the inverse transform and
//! compared step by step with the direct ones.

use crate::engine::{ForceParameters, TwoBodySystem};
use crate::error::Result;
use crate::runtime::{simulate, simulate_with_observer, SimulationRun, StepObserver, Trajectory};
use crate::transform::{derive, Model, TransformationParameters};
use serde::Serialize;

/// Everything produced by one validation round trip
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub parameters: TransformationParameters,
    /// Direct integration of `r1`, `r2`
    pub direct: SimulationRun,
    /// Integration of the reduced bodies `ra`, `rb`
    pub reduced: SimulationRun,
    pub r1_reconstructed: Trajectory,
    pub r2_reconstructed: Trajectory,
    /// `|r1 - r1_reconstructed|` per step
    pub error_r1: Vec<f64>,
    /// `|r2 - r2_reconstructed|` per step
    pub error_r2: Vec<f64>,
    /// `|ra - (alpha1*r1 + alpha2*r2)|` per step
    pub projection_error_ra: Vec<f64>,
    /// `|rb - (beta1*r1 + beta2*r2)|` per step
    pub projection_error_rb: Vec<f64>,
}

impl ValidationReport {
    /// Largest reconstruction error over both bodies and all steps
    pub fn max_error(&self) -> f64 {
        max_of(self.error_r1.iter().chain(self.error_r2.iter()))
    }

    /// Reconstruction error after the last step
    pub fn final_error(&self) -> f64 {
        let e1 = self.error_r1.last().copied().unwrap_or(0.0);
        let e2 = self.error_r2.last().copied().unwrap_or(0.0);
        e1.max(e2)
    }

    /// Largest forward projection error over both reduced bodies
    pub fn max_projection_error(&self) -> f64 {
        max_of(
            self.projection_error_ra
                .iter()
                .chain(self.projection_error_rb.iter()),
        )
    }

    pub fn within(&self, tolerance: f64) -> bool {
        self.max_error() <= tolerance
    }
}

fn max_of<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    values.copied().fold(0.0_f64, f64::max)
}

/// Run the round trip; the direct and reduced runs share no state and run in parallel
pub fn validate(
    initial: &TwoBodySystem,
    force: &ForceParameters,
    model: Model,
    dt: f64,
    n_steps: usize,
) -> Result<ValidationReport> {
    let parameters = derive(initial.b1.mass, initial.b2.mass, force.p, force.k, model)?;
    let reduced_initial = parameters.reduced_system(initial);
    let reduced_force = parameters.reduced_force();

    let (direct, reduced) = rayon::join(
        || simulate(initial, force, dt, n_steps),
        || simulate(&reduced_initial, &reduced_force, dt, n_steps),
    );

    assemble(parameters, direct?, reduced?)
}

/// Run the round trip sequentially, reporting progress of both runs to `observer`.
///
/// The observer sees the direct run as steps `1..=n_steps` and the reduced run as
/// `n_steps+1..=2*n_steps` of a `2*n_steps` total.
pub fn validate_with_observer(
    initial: &TwoBodySystem,
    force: &ForceParameters,
    model: Model,
    dt: f64,
    n_steps: usize,
    observer: &mut dyn StepObserver,
) -> Result<ValidationReport> {
    let parameters = derive(initial.b1.mass, initial.b2.mass, force.p, force.k, model)?;
    let total = 2 * n_steps;

    let direct = simulate_with_observer(
        initial,
        force,
        dt,
        n_steps,
        &mut |done: usize, _: usize| observer.on_step(done, total),
    )?;
    let reduced = simulate_with_observer(
        &parameters.reduced_system(initial),
        &parameters.reduced_force(),
        dt,
        n_steps,
        &mut |done: usize, _: usize| observer.on_step(n_steps + done, total),
    )?;

    assemble(parameters, direct, reduced)
}

fn assemble(
    parameters: TransformationParameters,
    direct: SimulationRun,
    reduced: SimulationRun,
) -> Result<ValidationReport> {
    let reduced = reduced.relabel("ra", "rb");
    direct.check_finite()?;
    reduced.check_finite()?;

    let (rec1, rec2): (Vec<_>, Vec<_>) = reduced
        .r1
        .iter()
        .zip(reduced.r2.iter())
        .map(|(&ra, &rb)| parameters.inverse(ra, rb))
        .unzip();
    let r1_reconstructed = Trajectory::from_points("r1 from ra,rb", rec1);
    let r2_reconstructed = Trajectory::from_points("r2 from ra,rb", rec2);

    let (proj_a, proj_b): (Vec<_>, Vec<_>) = direct
        .r1
        .iter()
        .zip(direct.r2.iter())
        .map(|(&r1, &r2)| parameters.forward(r1, r2))
        .unzip();
    let ra_projected = Trajectory::from_points("ra from r1,r2", proj_a);
    let rb_projected = Trajectory::from_points("rb from r1,r2", proj_b);

    let report = ValidationReport {
        error_r1: direct.r1.distances_to(&r1_reconstructed),
        error_r2: direct.r2.distances_to(&r2_reconstructed),
        projection_error_ra: reduced.r1.distances_to(&ra_projected),
        projection_error_rb: reduced.r2.distances_to(&rb_projected),
        parameters,
        direct,
        reduced,
        r1_reconstructed,
        r2_reconstructed,
    };

    tracing::debug!(
        max_error = report.max_error(),
        final_error = report.final_error(),
        "validation round trip complete"
    );

    Ok(report)
}
