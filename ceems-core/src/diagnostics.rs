//! Diagnostics and error reporting for CEEMS
//!
//! Turns errors into user-facing messages with a hint at which configuration
//! value has to change, since no error here goes away on a retry.

use crate::error::CeemsError;
use crate::runtime::SimulationRun;

/// Format an error together with a hint about how to resolve it
pub fn format_error(error: &CeemsError) -> String {
    let mut msg = format!("Error: {}", error);

    let hint = match error {
        CeemsError::InvalidConfiguration { .. } => {
            Some("check masses, dt, the number of steps and the model selector")
        }
        CeemsError::Domain { .. } => {
            Some("this (model, mass) combination has no real decoupling; pick another model or masses")
        }
        CeemsError::DegenerateTransform { .. } => {
            Some("ra and rb are not independent for these parameters; pick another effective mass")
        }
        CeemsError::NumericalInstability { .. } => {
            Some("the bodies likely came too close; reduce dt or change the initial conditions")
        }
        CeemsError::Io(_) | CeemsError::ConfigParse(_) => None,
    };

    if let Some(hint) = hint {
        msg.push_str(&format!("\n  hint: {}", hint));
    }

    msg
}

/// Relative drift of the body separation over a run: `max |d(t) - d(0)| / d(0)`
pub fn separation_drift(run: &SimulationRun) -> f64 {
    let separations = run.separations();
    let Some(&initial) = separations.first() else {
        return 0.0;
    };
    separations
        .iter()
        .map(|d| (d - initial).abs() / initial)
        .fold(0.0_f64, f64::max)
}
