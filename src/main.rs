use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use maze_aco::experiment::MazeExperiment;
use maze_aco::experiment_config::ExperimentConfig;

#[derive(Parser)]
#[command(name = "maze_aco")]
#[command(version)]
#[command(about = "Ant colony optimization of shortest routes through grid mazes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,

    /// Experiment config, YAML or RON
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let config = ExperimentConfig::from_file(&cli.config)?;
    let base = cli.config.parent().unwrap_or_else(|| Path::new("."));
    let outcome = MazeExperiment::run(&config, base, !cli.quiet)?;

    info!(
        "Route size: {} (seed {}), time taken: {:.3}s",
        outcome.route.size(),
        outcome.seed,
        outcome.elapsed.as_secs_f64()
    );

    Ok(())
}
