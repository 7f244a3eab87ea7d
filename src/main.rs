//! mipgen CLI - labelled random MILP instances for benchmark datasets.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn, LevelFilter};
use mipgen::{InstanceGenerator, RandomSource, RunConfig, SamplingLoop, SolverFactory};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mipgen")]
#[command(version)]
#[command(about = "Generate solver-labelled bin packing, multi-knapsack and set cover instances")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every batch of a configuration file
    Generate {
        /// Path to configuration file
        #[arg(short, long, default_value = "mipgen.toml")]
        config: PathBuf,

        /// Override the output directory of the configuration
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show example configuration
    Example,
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn generate(config_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let mut config = RunConfig::from_file(&config_path)?;
    if let Some(output) = output {
        config.output_dir = output;
    }
    config.validate()?;

    if !config.output_dir.is_dir() {
        bail!(
            "output directory {} does not exist",
            config.output_dir.display()
        );
    }

    let solver = SolverFactory::create(&config.solver);
    info!(
        "Generating {} batches with {} (seed {})",
        config.batches.len(),
        solver.name(),
        config.seed
    );

    let mut sampler = SamplingLoop::new(solver.as_ref(), RandomSource::new(config.seed));
    for batch in &config.batches {
        let report = sampler
            .generate_and_export(batch.n_problems, &batch.problem, &config.output_dir)
            .with_context(|| format!("batch {} failed", batch.problem.family()))?;

        if report.is_short() {
            warn!(
                "{}: only {}/{} feasible instances within {} attempts",
                report.family, report.accepted, report.requested, report.attempts
            );
        }
        info!(
            "{}: exported {}, failed {}",
            report.family, report.exported, report.failed_exports
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Generate { config, output } => generate(config, output),
        Commands::Example => {
            println!("{}", RunConfig::example());
            Ok(())
        }
    }
}
