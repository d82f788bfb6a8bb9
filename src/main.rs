use std::env;
use std::io::{BufRead, Write};

use parabolic_sim::chart::save_chart;
use parabolic_sim::config::{ConfigError, SimulationConfig};
use parabolic_sim::console::{Console, ConsoleError, RunRequest};
use parabolic_sim::core::window::AxisBounds;
use parabolic_sim::logging::init_tracing;
use parabolic_sim::{Projectile, SimError, TrajectorySampler};
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Console(#[from] ConsoleError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("Unknown option '{0}'.")]
    UnknownOption(String),
}

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    help: bool,
    no_chart: bool,
    print_samples: bool,
    positional: Vec<String>,
}

fn parse_cli(args: &[String]) -> Result<CliOptions, AppError> {
    let mut options = CliOptions::default();
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "--no-chart" => options.no_chart = true,
            "--samples" => options.print_samples = true,
            flag if flag.starts_with("--") => {
                return Err(AppError::UnknownOption(flag.to_string()));
            }
            _ => options.positional.push(arg.clone()),
        }
    }
    Ok(options)
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program} [--no-chart] [--samples]");
    println!(
        "  {program} [--no-chart] [--samples] <speed_mps> <angle_deg> <height_m> [time_step_s]"
    );
    println!();
    println!("Examples:");
    println!("  {program}");
    println!("  {program} 50 45 0");
    println!("  {program} --no-chart 10 0 5 0.01");
}

fn simulate<R: BufRead, W: Write>(
    config: &SimulationConfig,
    request: RunRequest,
    options: &CliOptions,
    console: &mut Console<R, W>,
) -> Result<(), AppError> {
    let projectile = Projectile::new(request.inputs)?;
    let time_step = request.time_step_s.unwrap_or(config.time_step);

    let (samples, summary) = TrajectorySampler::new(projectile, time_step, config.stop_policy())?
        .with_max_samples(config.max_samples)
        .collect()?;

    if options.print_samples {
        let out = console.output();
        writeln!(out, "\n{:>10} {:>12} {:>12}", "t (s)", "x (m)", "y (m)")
            .map_err(ConsoleError::from)?;
        for sample in &samples {
            writeln!(out, "{:>10.2} {:>12.2} {:>12.2}", sample.time, sample.x, sample.y)
                .map_err(ConsoleError::from)?;
        }
    }

    console.print_summary(&projectile, &summary)?;

    if !options.no_chart {
        let bounds = AxisBounds::from_hints(
            &projectile,
            request.thresholds,
            config.x_padding,
            config.y_padding,
        );
        match save_chart(
            &config.chart_dir,
            config.chart_size,
            &projectile,
            &samples,
            &summary,
            bounds,
        ) {
            Ok(path) => writeln!(console.output(), "Chart saved to {}", path.display())
                .map_err(ConsoleError::from)?,
            Err(err) => {
                tracing::warn!(%err, "chart not written");
                writeln!(console.output(), "Chart not written: {err}")
                    .map_err(ConsoleError::from)?;
            }
        }
    }

    Ok(())
}

fn interactive<R: BufRead, W: Write>(
    config: &SimulationConfig,
    options: &CliOptions,
    console: &mut Console<R, W>,
) -> Result<(), AppError> {
    loop {
        let request = console.read_run_request(config.time_step)?;
        match simulate(config, request, options, console) {
            Ok(()) => {}
            Err(AppError::Sim(err)) => {
                tracing::warn!(%err, "run rejected");
                writeln!(console.output(), "Error: {err}").map_err(ConsoleError::from)?;
            }
            Err(err) => return Err(err),
        }

        if !console.confirm("\nSimulate another? (yes/no): ")? {
            return Ok(());
        }
    }
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = env::args().collect();
    let options = parse_cli(args.get(1..).unwrap_or_default())?;

    if options.help {
        print_usage(&args[0]);
        return Ok(());
    }

    let config = SimulationConfig::load()?;
    tracing::info!(
        time_step_s = config.time_step,
        max_time_s = ?config.max_time,
        ground_impact = config.ground_impact,
        "configuration ready"
    );

    let mut console = Console::stdio();
    if options.positional.is_empty() {
        interactive(&config, &options, &mut console)
    } else {
        let request = RunRequest::from_args(&options.positional)?;
        simulate(&config, request, &options, &mut console)
    }
}

fn main() {
    // Load .env before the subscriber so RUST_LOG can live there.
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(err) = run() {
        tracing::error!(%err, "run failed");
        eprintln!("Error: {err}");
        print_usage("cargo run --");
        std::process::exit(1);
    }
}
