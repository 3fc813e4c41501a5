use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::experiment_config::ExperimentConfigError;
use crate::grid::PathSpecification;
use crate::import::ImportError;
use crate::maze::Maze;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MazeConfig {
    pub maze_file: String,
    pub coordinates_file: String,
}

impl MazeConfig {
    pub fn load_maze(&self) -> Result<Maze, ExperimentConfigError> {
        Maze::create_maze(&self.maze_file).map_err(import_error)
    }

    pub fn load_specification(&self) -> Result<PathSpecification, ExperimentConfigError> {
        PathSpecification::read_coordinates(&self.coordinates_file).map_err(import_error)
    }

    /// Resolves relative file names against `base`, the directory of the config file.
    pub fn relative_to(&self, base: &Path) -> MazeConfig {
        let resolve = |file: &str| {
            let path = Path::new(file);
            if path.is_absolute() {
                file.to_string()
            } else {
                base.join(path).display().to_string()
            }
        };

        MazeConfig {
            maze_file: resolve(&self.maze_file),
            coordinates_file: resolve(&self.coordinates_file),
        }
    }
}

fn import_error(error: ImportError) -> ExperimentConfigError {
    ExperimentConfigError::InvalidMazeConfig(error.to_string())
}
