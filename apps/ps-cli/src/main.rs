mod comparison;
mod error;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ps_controls::{GainAxis, PidGains};
use ps_core::Real;
use ps_sim::{GainSweep, MetricsStatus, SimConfig, Simulation, run_sweep, simulate_with};

use crate::comparison::{
    Comparison, DEFAULT_PLANT_DEN, DEFAULT_PLANT_NUM, DEFAULT_POINTS, DEFAULT_T_END, GridSpec,
    PlantSpec,
};
use crate::error::CliResult;

#[derive(Parser)]
#[command(name = "ps-cli")]
#[command(about = "PIDscope CLI - closed-loop PID step response and metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one gain set and print its metrics
    Run {
        #[command(flatten)]
        gains: GainArgs,
        #[command(flatten)]
        system: SystemArgs,
    },
    /// Vary one gain and print a row per value
    Sweep {
        /// Gain to vary
        #[arg(long, value_enum)]
        axis: AxisArg,
        /// Comma-separated values for the swept gain
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        values: Vec<Real>,
        /// Gains held fixed while sweeping
        #[command(flatten)]
        gains: GainArgs,
        #[command(flatten)]
        system: SystemArgs,
    },
    /// Compare labelled gain sets from a YAML file
    Compare {
        /// Path to the comparison YAML file
        config_path: PathBuf,
    },
}

#[derive(Args)]
struct GainArgs {
    /// Proportional gain
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    kp: Real,
    /// Integral gain
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    ki: Real,
    /// Derivative gain
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    kd: Real,
}

impl GainArgs {
    fn gains(&self) -> PidGains {
        PidGains::new(self.kp, self.ki, self.kd)
    }
}

#[derive(Args)]
struct SystemArgs {
    /// Plant numerator coefficients, highest power first
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    plant_num: Option<Vec<Real>>,
    /// Plant denominator coefficients, highest power first
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    plant_den: Option<Vec<Real>>,
    /// Simulation horizon in seconds
    #[arg(long, default_value_t = DEFAULT_T_END)]
    t_end: Real,
    /// Number of grid points, endpoint included
    #[arg(long, default_value_t = DEFAULT_POINTS)]
    points: usize,
}

impl SystemArgs {
    fn plant(&self) -> PlantSpec {
        PlantSpec {
            num: self.plant_num.clone().unwrap_or_else(|| DEFAULT_PLANT_NUM.to_vec()),
            den: self.plant_den.clone().unwrap_or_else(|| DEFAULT_PLANT_DEN.to_vec()),
        }
    }

    fn grid(&self) -> GridSpec {
        GridSpec {
            t_end: self.t_end,
            points: self.points,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    Kp,
    Ki,
    Kd,
}

impl From<AxisArg> for GainAxis {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::Kp => GainAxis::Kp,
            AxisArg::Ki => GainAxis::Ki,
            AxisArg::Kd => GainAxis::Kd,
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { gains, system } => cmd_run(gains.gains(), &system),
        Commands::Sweep {
            axis,
            values,
            gains,
            system,
        } => cmd_sweep(axis.into(), &values, gains.gains(), &system),
        Commands::Compare { config_path } => cmd_compare(&Comparison::load(&config_path)?),
    }
}

fn cmd_run(gains: PidGains, system: &SystemArgs) -> CliResult<()> {
    let plant = system.plant().build()?;
    let grid = system.grid().build()?;

    println!("Plant: {}", plant);
    println!("Gains: {} ({})", gains, gains.kind());

    let sim = simulate_with(gains, &plant, &grid, &SimConfig::default())?;
    println!("Closed loop: {}", sim.system);
    println!("\nMetrics:");
    for (key, value) in sim.metrics.iter() {
        println!("  {:<18} {:>12.6}", key, value);
    }
    print_status(&sim);

    Ok(())
}

fn cmd_sweep(
    axis: GainAxis,
    values: &[Real],
    base: PidGains,
    system: &SystemArgs,
) -> CliResult<()> {
    let plant = system.plant().build()?;
    let grid = system.grid().build()?;
    let sweep = GainSweep::along(base, axis, values);

    println!("Sweeping {} over {} values (plant {})", axis, sweep.len(), plant);
    print_header(&axis.to_string());

    for point in run_sweep(&plant, &grid, &sweep, &SimConfig::default()) {
        let label = format!("{}", point.gains.get(axis));
        match &point.outcome {
            Ok(sim) => print_row(&label, sim),
            Err(e) => println!("{:<16} error: {}", label, e),
        }
    }
    Ok(())
}

fn cmd_compare(comparison: &Comparison) -> CliResult<()> {
    let plant = comparison.plant.build()?;
    let grid = comparison.grid.build()?;
    let entries = comparison.entries();
    tracing::info!(controllers = entries.len(), "running comparison");

    println!("Plant: {}", plant);
    println!(
        "Grid: {} points on [0, {}] s\n",
        comparison.grid.points, comparison.grid.t_end
    );
    print_header("controller");

    let sweep = GainSweep::from_gains(entries.iter().map(|e| e.gains));
    let points = run_sweep(&plant, &grid, &sweep, &SimConfig::default());
    for (entry, point) in entries.iter().zip(&points) {
        match &point.outcome {
            Ok(sim) => print_row(&entry.label, sim),
            Err(e) => println!("{:<16} error: {}", entry.label, e),
        }
    }
    Ok(())
}

fn print_header(first: &str) {
    println!(
        "{:<16} {:<10} {:>12} {:>12} {:>12} {:>12}  status",
        first, "case", "overshoot%", "settling_s", "rise_s", "sse"
    );
}

fn print_row(label: &str, sim: &Simulation) {
    let m = &sim.metrics;
    let status = match &m.status {
        MetricsStatus::Complete => "ok".to_string(),
        MetricsStatus::Degraded { reason } => format!("degraded ({})", reason),
    };
    println!(
        "{:<16} {:<10} {:>12.3} {:>12.3} {:>12.3} {:>12.5}  {}",
        label,
        sim.kind.label(),
        m.overshoot,
        m.settling_time,
        m.rise_time,
        m.steady_state_error,
        status
    );
}

fn print_status(sim: &Simulation) {
    match &sim.metrics.status {
        MetricsStatus::Complete => {
            if let Some(info) = &sim.metrics.info {
                println!("  {:<18} {:>12.6}", "Peak", info.peak);
                println!("  {:<18} {:>12.6}", "PeakTime", info.peak_time);
                println!("  {:<18} {:>12.6}", "Undershoot", info.undershoot);
                println!("  {:<18} {:>12.6}", "FinalValue", info.steady_state_value);
            }
        }
        MetricsStatus::Degraded { reason } => {
            println!("\n⚠ Metrics degraded: {}", reason);
            println!("  Only SteadyStateError is meaningful for this run.");
        }
    }
}
