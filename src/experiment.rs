use csv::Writer;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

use crate::experiment_config::{ExperimentConfig, ExperimentConfigError};
use crate::metaheuristic::aco::{GenerationStats, Supervisor};
use crate::metaheuristic::{Aco, Route};

/// What a finished experiment produced.
#[derive(Debug)]
pub struct ExperimentOutcome {
    pub route: Route,
    pub seed: u128,
    pub elapsed: Duration,
}

pub struct MazeExperiment {}

impl MazeExperiment {
    /// Loads maze and coordinates, runs the colony and writes every configured output file.
    /// Relative maze paths are resolved against `base`.
    pub fn run(
        config: &ExperimentConfig,
        base: &Path,
        show_progress: bool,
    ) -> Result<ExperimentOutcome, ExperimentConfigError> {
        let maze_cfg = config.maze.relative_to(base);
        let mut maze = maze_cfg.load_maze()?;
        let spec = maze_cfg.load_specification()?;
        let params = config.algorithm.aco().params();
        let seed = params.seed;
        let generations = params.generations;

        let stats: Box<dyn Write> = match &config.experiment.statistics_file {
            Some(file) => Box::new(create_file(file)?),
            None => Box::new(io::sink()),
        };
        let supervisor = Supervisor::new(Writer::from_writer(stats));

        info!(
            "Searching {} -> {} with {} ants for {} generations (seed {})",
            spec.start(),
            spec.end(),
            params.ants_per_generation,
            generations,
            seed
        );

        let progress = if show_progress {
            let bar = ProgressBar::new(generations as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
                    .progress_chars("=> "),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let start = Instant::now();
        let mut aco = Aco::new(&mut maze, params, supervisor)?;
        let route = aco.find_shortest_route_with(spec, |stats: &GenerationStats| {
            progress.inc(1);
            if let Some(best) = stats.best {
                progress.set_message(&format!("best {}", best));
            }
        });
        let elapsed = start.elapsed();
        drop(aco);

        let route = match route {
            Ok(route) => {
                progress.finish_with_message(&format!("best {}", route.size()));
                route
            }
            Err(error) => {
                progress.abandon();
                return Err(error.into());
            }
        };

        let solution_file = &config.experiment.solution_file;
        let mut solution = create_file(solution_file)?;
        route
            .write_to(&mut solution)
            .map_err(|e| io_error(solution_file, e))?;

        if let Some(file) = &config.experiment.pheromone_file {
            let mut writer = create_file(file)?;
            maze.write_pheromones(&mut writer, &HashSet::new())
                .map_err(|e| io_error(file, e))?;
        }

        info!(
            "Route of length {} written to {}",
            route.size(),
            config.experiment.solution_file
        );

        Ok(ExperimentOutcome {
            route,
            seed,
            elapsed,
        })
    }
}

fn create_file(name: &str) -> Result<File, ExperimentConfigError> {
    let path = Path::new(name);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error(name, e))?;
        }
    }
    File::create(path).map_err(|e| io_error(name, e))
}

fn io_error(name: &str, error: io::Error) -> ExperimentConfigError {
    ExperimentConfigError::Io(format!("{}: {}", name, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment_config::{AcoExperiment, AlgoConfig, GeneralExperimentConfig, MazeConfig};
    use crate::metaheuristic::aco::AcoError;
    use std::env;
    use std::path::PathBuf;

    fn workspace(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("maze_aco_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(dir: &Path, maze: &str, coordinates: &str, generations: usize) -> ExperimentConfig {
        fs::write(dir.join("maze.txt"), maze).unwrap();
        fs::write(dir.join("coordinates.txt"), coordinates).unwrap();

        ExperimentConfig {
            experiment: GeneralExperimentConfig {
                solution_file: dir.join("out/solution.txt").display().to_string(),
                statistics_file: Some(dir.join("out/stats.csv").display().to_string()),
                pheromone_file: Some(dir.join("out/pheromones.txt").display().to_string()),
            },
            algorithm: AlgoConfig::Aco(AcoExperiment {
                ants_per_generation: 4,
                generations,
                q: 10.0,
                evaporation: 0.1,
                seed: 7,
                alpha: 1.0,
                beta: 0.2,
                revisit_penalty: 0.1,
                max_iterations: 1000,
                parallel: true,
            }),
            maze: MazeConfig {
                maze_file: "maze.txt".to_string(),
                coordinates_file: "coordinates.txt".to_string(),
            },
        }
    }

    #[test]
    fn run_writes_all_outputs() {
        let dir = workspace("outputs");
        let cfg = config(&dir, "3 3\n1 1 1\n1 1 1\n1 1 1\n", "0, 0;\n2, 2;\n", 3);
        let outcome = MazeExperiment::run(&cfg, &dir, false).unwrap();

        assert_eq!(outcome.seed, 7);
        assert!(outcome.route.done());
        assert_eq!(outcome.route.size() % 2, 0);

        let solution = fs::read_to_string(dir.join("out/solution.txt")).unwrap();
        assert!(solution.starts_with(&format!("{};\n0, 0;\n", outcome.route.size())));
        assert_eq!(solution.lines().count(), outcome.route.size() + 2);
        let stats = fs::read_to_string(dir.join("out/stats.csv")).unwrap();
        assert_eq!(stats.lines().count(), 4);
        let pheromones = fs::read_to_string(dir.join("out/pheromones.txt")).unwrap();
        assert_eq!(pheromones.lines().count(), 3);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn run_reports_missing_maze_file() {
        let dir = workspace("missing");
        let mut cfg = config(&dir, "1 1\n1\n", "0, 0;\n0, 0;\n", 1);
        cfg.maze.maze_file = "does_not_exist.txt".to_string();

        assert!(matches!(
            MazeExperiment::run(&cfg, &dir, false),
            Err(ExperimentConfigError::InvalidMazeConfig(_))
        ));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn run_reports_unreachable_end() {
        let dir = workspace("unreachable");
        let cfg = config(&dir, "3 1\n1 0 1\n", "0, 0;\n2, 0;\n", 2);

        assert_eq!(
            MazeExperiment::run(&cfg, &dir, false).unwrap_err(),
            ExperimentConfigError::Aco(AcoError::NoRouteFound { generations: 2 })
        );
        assert!(!dir.join("out/solution.txt").exists());

        fs::remove_dir_all(dir).unwrap();
    }
}
