use crate::engine::{ForceParameters, TwoBodySystem};
use glam::DVec2;

/// Position and velocity increments of both bodies over one RK4 stage
#[derive(Debug, Clone, Copy, Default)]
struct Increment {
    dr1: DVec2,
    dv1: DVec2,
    dr2: DVec2,
    dv2: DVec2,
}

impl Increment {
    fn weighted_sum(k1: &Self, k2: &Self, k3: &Self, k4: &Self) -> Self {
        let combine = |a: DVec2, b: DVec2, c: DVec2, d: DVec2| (a + (b + c) * 2.0 + d) / 6.0;
        Self {
            dr1: combine(k1.dr1, k2.dr1, k3.dr1, k4.dr1),
            dv1: combine(k1.dv1, k2.dv1, k3.dv1, k4.dv1),
            dr2: combine(k1.dr2, k2.dr2, k3.dr2, k4.dr2),
            dv2: combine(k1.dv2, k2.dv2, k3.dv2, k4.dv2),
        }
    }
}

/// Evaluate one stage at the state offset by `prev * h` from the start of the step.
///
/// Body 2's acceleration is never taken from the force law: it is the reaction of
/// body 1's, so `m1*dv1 + m2*dv2` vanishes at every stage up to rounding.
fn stage(
    system: &TwoBodySystem,
    force: &ForceParameters,
    dt: f64,
    prev: &Increment,
    h: f64,
) -> Increment {
    let r1 = system.b1.pos + prev.dr1 * h;
    let r2 = system.b2.pos + prev.dr2 * h;
    let v1 = system.b1.vel + prev.dv1 * h;
    let v2 = system.b2.vel + prev.dv2 * h;

    let a1 = system.acceleration_of_first(r1, r2, force);
    let a2 = system.reaction_acceleration(a1);

    Increment {
        dr1: v1 * dt,
        dv1: a1 * dt,
        dr2: v2 * dt,
        dv2: a2 * dt,
    }
}

/// Step the system forward by dt using classical 4th-order Runge-Kutta
pub fn step(system: &mut TwoBodySystem, force: &ForceParameters, dt: f64) {
    let k1 = stage(system, force, dt, &Increment::default(), 0.0);
    let k2 = stage(system, force, dt, &k1, 0.5);
    let k3 = stage(system, force, dt, &k2, 0.5);
    let k4 = stage(system, force, dt, &k3, 1.0);

    let delta = Increment::weighted_sum(&k1, &k2, &k3, &k4);

    system.b1.pos += delta.dr1;
    system.b1.vel += delta.dv1;
    system.b2.pos += delta.dr2;
    system.b2.vel += delta.dv2;
}
