//! gymfis - Adaptive Gym Machine Fuzzy Inference System
//!
//! Command-line driver for the fuzzy inference engine: single
//! computations, the scenario suite, family comparison and membership
//! documentation dumps.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use gymfis::scenarios::{comparison_table, format_report, run_suite};
use gymfis::{FisService, GymFisConfig, Inputs, LogLevel, MfFamily};

#[derive(Parser)]
#[command(name = "gymfis")]
#[command(version = "0.1.0")]
#[command(about = "Mamdani fuzzy controller for an adaptive resistance-training machine", long_about = None)]
struct Cli {
    /// Generated force, N (0-500)
    #[arg(long)]
    force: Option<f64>,

    /// Movement speed, m/s (0-1.5)
    #[arg(long)]
    speed: Option<f64>,

    /// Movement phase, % of range of motion (0-100)
    #[arg(long)]
    phase: Option<f64>,

    /// Fatigue index, % (0-100)
    #[arg(long)]
    fatigue: Option<f64>,

    /// Training mode: 1=strength, 2=hypertrophy, 3=endurance
    #[arg(long)]
    mode: Option<f64>,

    /// Membership-function family (triangular, gaussian, bell, sigmoid)
    #[arg(long, value_name = "FAMILY")]
    family: Option<String>,

    /// Configuration file (defaults to the standard search path)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit the compute result as JSON
    #[arg(long)]
    json: bool,

    /// Print the membership documentation table and exit
    #[arg(long)]
    table: bool,

    /// Print the membership snapshot as JSON and exit
    #[arg(long)]
    snapshot: bool,

    /// Run the biomechanical scenario suite and exit
    #[arg(long)]
    scenarios: bool,

    /// Compare all membership families over the scenario suite and exit
    #[arg(long)]
    compare: bool,

    /// Show per-rule firing strengths for the computed inputs
    #[arg(long)]
    activations: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gymfis={}", level.directive())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GymFisConfig::load_from(path)?,
        None => GymFisConfig::load()?,
    };

    if cli.quiet {
        config.general.log_level = LogLevel::Quiet;
    } else if cli.verbose {
        config.general.log_level = LogLevel::Verbose;
    }
    init_tracing(config.general.log_level);

    let family = match &cli.family {
        Some(name) => name.parse::<MfFamily>()?,
        None => config.engine.family,
    };

    if cli.compare {
        print!("{}", comparison_table()?);
        return Ok(());
    }

    let service = FisService::with_family(family)?;

    if cli.table {
        print!("{}", service.machine().membership_table());
        return Ok(());
    }

    if cli.snapshot {
        println!(
            "{}",
            serde_json::to_string_pretty(service.membership_snapshot())?
        );
        return Ok(());
    }

    if cli.scenarios {
        print!("{}", format_report(&run_suite(&service)));
        return Ok(());
    }

    let inputs = Inputs {
        force: cli.force.unwrap_or(config.defaults.force),
        speed: cli.speed.unwrap_or(config.defaults.speed),
        phase: cli.phase.unwrap_or(config.defaults.phase),
        fatigue: cli.fatigue.unwrap_or(config.defaults.fatigue),
        mode: cli.mode.unwrap_or(config.defaults.mode),
    };

    let result = service.compute(&inputs);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "family:     {} ({} rules)",
            service.family().label(),
            service.rule_count()
        );
        println!(
            "inputs:     force={} N, speed={} m/s, phase={}%, fatigue={}%, mode={}",
            inputs.force, inputs.speed, inputs.phase, inputs.fatigue, inputs.mode
        );
        println!("resistance: {:.1}%", result.resistance);
        println!(
            "feedback:   {:.2} ({})",
            result.feedback,
            result.feedback_text.label()
        );
        if let Some(ref error) = result.error {
            println!("note:       {}", error);
        }
    }

    if cli.activations {
        let fired = service.machine().activations(&inputs);
        if fired.is_empty() {
            println!("no rule fired");
        } else {
            println!("fired rules:");
            for activation in fired {
                if let Some(rule) = service.machine().rules().get(activation.rule) {
                    println!(
                        "  [{:>2}] strength {:.3}  {}",
                        activation.rule + 1,
                        activation.strength,
                        rule.describe()
                    );
                }
            }
        }
    }

    Ok(())
}
