use ceems_core::diagnostics::separation_drift;
use ceems_core::{SimulationRun, ValidationReport};
use glam::DVec2;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

fn fmt_vec(v: Option<DVec2>) -> String {
    match v {
        Some(v) => format!("({:+.6}, {:+.6})", v.x, v.y),
        None => "-".to_string(),
    }
}

pub fn print_simulation(run: &SimulationRun, dt: f64) {
    println!("steps          = {}", run.steps());
    println!("simulated time = {:.4}", run.steps() as f64 * dt);
    println!("r1 final       = {}", fmt_vec(run.r1.last()));
    println!("r2 final       = {}", fmt_vec(run.r2.last()));
    println!("momentum drift = {:.3e}", run.momentum_drift);
    println!("separation drift (relative) = {:.3e}", separation_drift(run));
}

pub fn print_validation(report: &ValidationReport) {
    println!("{}", report.parameters);
    println!("steps                      = {}", report.direct.steps());
    println!("ra final                   = {}", fmt_vec(report.reduced.r1.last()));
    println!("rb final                   = {}", fmt_vec(report.reduced.r2.last()));
    println!("max reconstruction error   = {:.3e}", report.max_error());
    println!("final reconstruction error = {:.3e}", report.final_error());
    println!("max projection error       = {:.3e}", report.max_projection_error());
}

pub fn write_json(report: &ValidationReport, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
