mod algo_config;
mod general_experiment_config;
mod maze_config;

pub use algo_config::{AcoExperiment, AlgoConfig, UnseededAcoExperiment};
pub use general_experiment_config::GeneralExperimentConfig;
pub use maze_config::MazeConfig;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::metaheuristic::aco::AcoError;

pub trait Fix<CorrectType> {
    fn to_fixed(&self) -> CorrectType;
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ExperimentConfig {
    pub experiment: GeneralExperimentConfig,
    pub algorithm: AlgoConfig,
    pub maze: MazeConfig,
}

impl ExperimentConfig {
    /// Reads a config file, YAML (`.yaml`, `.yml`) or RON (`.ron`) depending on its extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExperimentConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path)
            .map_err(|e| ExperimentConfigError::Io(format!("{}: {}", path.display(), e)))?;

        Self::parse(&content, format)
    }

    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ExperimentConfigError> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ExperimentConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => {
                ron::de::from_str(content).map_err(|e| ExperimentConfigError::Parse(e.to_string()))
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConfigFormat {
    Yaml,
    Ron,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExperimentConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("ron") => Ok(ConfigFormat::Ron),
            _ => Err(ExperimentConfigError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ExperimentConfigError {
    InvalidMazeConfig(String),
    UnsupportedFormat(String),
    Parse(String),
    Io(String),
    Aco(AcoError),
}

impl fmt::Display for ExperimentConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMazeConfig(msg) => write!(f, "{}", msg),
            Self::UnsupportedFormat(file) => write!(
                f,
                "Config file {} has no supported extension (yaml, yml, ron).",
                file
            ),
            Self::Parse(msg) => write!(f, "Config could not be parsed: {}", msg),
            Self::Io(msg) => write!(f, "{}", msg),
            Self::Aco(error) => write!(f, "{}", error),
        }
    }
}

impl Error for ExperimentConfigError {}

impl From<AcoError> for ExperimentConfigError {
    fn from(error: AcoError) -> Self {
        Self::Aco(error)
    }
}
