use crate::engine::{Body, ForceParameters, TwoBodySystem};
use crate::error::{CeemsError, Result};
use crate::integrator::step;
use glam::DVec2;
use serde::Serialize;
use std::ops::Index;

/// Positions of one body, the initial state followed by one entry per step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub label: String,
    points: Vec<DVec2>,
}

impl Trajectory {
    pub fn new(label: impl Into<String>, initial: DVec2, capacity: usize) -> Self {
        let mut points = Vec::with_capacity(capacity);
        points.push(initial);
        Self {
            label: label.into(),
            points,
        }
    }

    /// Build a trajectory from already computed points, e.g. a reconstruction
    pub fn from_points(label: impl Into<String>, points: Vec<DVec2>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub(crate) fn push(&mut self, point: DVec2) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DVec2> {
        self.points.iter()
    }

    pub fn first(&self) -> Option<DVec2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<DVec2> {
        self.points.last().copied()
    }

    /// Index of the first non-finite point, if any
    pub fn first_non_finite(&self) -> Option<usize> {
        self.points.iter().position(|p| !p.is_finite())
    }

    /// Fail with `NumericalInstability` if any point is non-finite
    pub fn check_finite(&self) -> Result<()> {
        match self.first_non_finite() {
            Some(step) => Err(CeemsError::NumericalInstability {
                trajectory: self.label.clone(),
                step,
            }),
            None => Ok(()),
        }
    }

    /// Per-point Euclidean distance to another trajectory of the same length
    pub fn distances_to(&self, other: &Trajectory) -> Vec<f64> {
        self.points
            .iter()
            .zip(other.points.iter())
            .map(|(a, b)| a.distance(*b))
            .collect()
    }
}

impl Index<usize> for Trajectory {
    type Output = DVec2;

    fn index(&self, index: usize) -> &DVec2 {
        &self.points[index]
    }
}

/// Receives a notification after every completed integration step
pub trait StepObserver {
    fn on_step(&mut self, completed: usize, total: usize);
}

/// Observer that ignores every step
pub struct NoProgress;

impl StepObserver for NoProgress {
    fn on_step(&mut self, _completed: usize, _total: usize) {}
}

impl<F: FnMut(usize, usize)> StepObserver for F {
    fn on_step(&mut self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Result of one run of the simulation driver
#[derive(Debug, Clone, Serialize)]
pub struct SimulationRun {
    pub r1: Trajectory,
    pub r2: Trajectory,
    pub final_state: TwoBodySystem,
    /// Largest deviation of total momentum from its initial value over the run
    pub momentum_drift: f64,
}

impl SimulationRun {
    pub fn steps(&self) -> usize {
        self.r1.len().saturating_sub(1)
    }

    pub fn relabel(mut self, first: &str, second: &str) -> Self {
        self.r1.label = first.to_string();
        self.r2.label = second.to_string();
        self
    }

    /// Fail with `NumericalInstability` if either trajectory left the finite range
    pub fn check_finite(&self) -> Result<()> {
        self.r1.check_finite()?;
        self.r2.check_finite()
    }

    /// Separation of the two bodies at every recorded step
    pub fn separations(&self) -> Vec<f64> {
        self.r1.distances_to(&self.r2)
    }
}

/// Run the integrator `n_steps` times from `initial`
pub fn simulate(
    initial: &TwoBodySystem,
    force: &ForceParameters,
    dt: f64,
    n_steps: usize,
) -> Result<SimulationRun> {
    simulate_with_observer(initial, force, dt, n_steps, &mut NoProgress)
}

/// Run the integrator `n_steps` times, notifying `observer` after each step
pub fn simulate_with_observer(
    initial: &TwoBodySystem,
    force: &ForceParameters,
    dt: f64,
    n_steps: usize,
    observer: &mut dyn StepObserver,
) -> Result<SimulationRun> {
    if !(dt > 0.0 && dt.is_finite()) {
        return Err(CeemsError::invalid(format!(
            "dt must be positive and finite, got {}",
            dt
        )));
    }
    let mut state = TwoBodySystem::try_new(initial.b1, initial.b2)?;

    tracing::debug!(n_steps, dt, k = force.k, p = force.p, "starting two-body run");

    let mut r1 = Trajectory::new("r1", state.b1.pos, n_steps + 1);
    let mut r2 = Trajectory::new("r2", state.b2.pos, n_steps + 1);
    let p0 = state.total_momentum();
    let mut momentum_drift = 0.0_f64;

    for i in 0..n_steps {
        step(&mut state, force, dt);
        r1.push(state.b1.pos);
        r2.push(state.b2.pos);
        momentum_drift = momentum_drift.max((state.total_momentum() - p0).length());
        observer.on_step(i + 1, n_steps);
    }

    if !state.is_finite() {
        tracing::warn!(
            first_bad_r1 = ?r1.first_non_finite(),
            first_bad_r2 = ?r2.first_non_finite(),
            "trajectory became non-finite"
        );
    }

    Ok(SimulationRun {
        r1,
        r2,
        final_state: state,
        momentum_drift,
    })
}

/// Shorthand building the system from loose initial values
#[allow(clippy::too_many_arguments)]
pub fn simulate_bodies(
    r1_0: DVec2,
    v1_0: DVec2,
    r2_0: DVec2,
    v2_0: DVec2,
    m1: f64,
    m2: f64,
    force: &ForceParameters,
    dt: f64,
    n_steps: usize,
) -> Result<(Trajectory, Trajectory)> {
    let system = TwoBodySystem::try_new(Body::new(m1, r1_0, v1_0), Body::new(m2, r2_0, v2_0))?;
    let run = simulate(&system, force, dt, n_steps)?;
    Ok((run.r1, run.r2))
}
