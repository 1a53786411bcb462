mod progress;
mod report;

use ceems_core::config::ModelSelector;
use ceems_core::diagnostics::format_error;
use ceems_core::{
    derive, simulate_with_observer, validate, validate_with_observer, CeemsError,
    SimulationConfig,
};
use clap::{Args, Parser, Subcommand};
use progress::ProgressLog;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ceems")]
#[command(about = "Two-body power-law integrator and decoupling transform check", long_about = None)]
struct Cli {
    /// TOML configuration file; flags below override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Default)]
struct Overrides {
    /// Mass of body 1
    #[arg(long, global = true)]
    m1: Option<f64>,

    /// Mass of body 2
    #[arg(long, global = true)]
    m2: Option<f64>,

    /// Coupling constant k in F = k * r^p
    #[arg(short, long, global = true, allow_hyphen_values = true)]
    k: Option<f64>,

    /// Force exponent p in F = k * r^p
    #[arg(short, long, global = true, allow_hyphen_values = true)]
    p: Option<f64>,

    /// Integration step size
    #[arg(long, global = true)]
    dt: Option<f64>,

    /// Total simulated time
    #[arg(long, global = true)]
    duration: Option<f64>,

    /// Number of steps (overrides duration)
    #[arg(long, global = true)]
    steps: Option<usize>,

    /// Effective-mass model: 1/random, 2/non-gravitational, 3/newtonian
    #[arg(long, global = true)]
    model: Option<String>,

    /// Effective mass A for the random model
    #[arg(long, global = true)]
    effective_mass: Option<f64>,

    /// Seed used when the random model draws A
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate the two-body system and report conservation diagnostics
    Simulate,
    /// Print the decoupling transform for the configured masses and model
    Transform,
    /// Integrate both the original and the reduced system and compare them
    Validate {
        /// Write the full report (all trajectories and errors) as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail when the largest reconstruction error exceeds this value
        #[arg(long)]
        tolerance: Option<f64>,

        /// Log progress while integrating (runs both systems sequentially)
        #[arg(long)]
        progress: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_config(cli.config.as_ref(), &cli.overrides).and_then(|config| {
        match cli.command {
            Commands::Simulate => run_simulate(&config),
            Commands::Transform => run_transform(&config),
            Commands::Validate {
                output,
                tolerance,
                progress,
            } => run_validate(&config, output.as_ref(), tolerance, progress),
        }
    });

    if let Err(e) = result {
        match e.downcast_ref::<CeemsError>() {
            Some(err) => eprintln!("{}", format_error(err)),
            None => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(
    path: Option<&PathBuf>,
    overrides: &Overrides,
) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(m1) = overrides.m1 {
        config.bodies.m1 = m1;
    }
    if let Some(m2) = overrides.m2 {
        config.bodies.m2 = m2;
    }
    if let Some(k) = overrides.k {
        config.force.k = k;
    }
    if let Some(p) = overrides.p {
        config.force.p = p;
    }
    if let Some(dt) = overrides.dt {
        config.integration.dt = dt;
    }
    if let Some(duration) = overrides.duration {
        config.integration.duration = duration;
        config.integration.steps = None;
    }
    if let Some(steps) = overrides.steps {
        config.integration.steps = Some(steps);
    }
    if let Some(model) = &overrides.model {
        config.transform.model = ModelSelector::Name(model.clone());
    }
    if let Some(a) = overrides.effective_mass {
        config.transform.effective_mass = Some(a);
    }
    if let Some(seed) = overrides.seed {
        config.transform.seed = seed;
    }

    config.validate()?;
    Ok(config)
}

fn run_simulate(config: &SimulationConfig) -> Result<(), Box<dyn std::error::Error>> {
    let system = config.initial_system()?;
    let n_steps = config.n_steps();
    let mut progress = ProgressLog::new("simulate");

    let run = simulate_with_observer(
        &system,
        &config.force_parameters(),
        config.dt(),
        n_steps,
        &mut progress,
    )?;
    run.check_finite()?;

    report::print_simulation(&run, config.dt());
    Ok(())
}

fn run_transform(config: &SimulationConfig) -> Result<(), Box<dyn std::error::Error>> {
    let force = config.force_parameters();
    let params = derive(
        config.bodies.m1,
        config.bodies.m2,
        force.p,
        force.k,
        config.model()?,
    )?;
    println!("{}", params);
    Ok(())
}

fn run_validate(
    config: &SimulationConfig,
    output: Option<&PathBuf>,
    tolerance: Option<f64>,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let system = config.initial_system()?;
    let force = config.force_parameters();
    let model = config.model()?;
    let n_steps = config.n_steps();

    let report = if progress {
        let mut log = ProgressLog::new("validate");
        validate_with_observer(&system, &force, model, config.dt(), n_steps, &mut log)?
    } else {
        validate(&system, &force, model, config.dt(), n_steps)?
    };

    report::print_validation(&report);

    if let Some(path) = output {
        report::write_json(&report, path)?;
        tracing::info!("wrote report to {}", path.display());
    }

    if let Some(tolerance) = tolerance {
        if !report.within(tolerance) {
            return Err(format!(
                "reconstruction error {:.3e} exceeds tolerance {:.3e}",
                report.max_error(),
                tolerance
            )
            .into());
        }
    }

    Ok(())
}
