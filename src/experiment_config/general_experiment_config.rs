use serde::{Deserialize, Serialize};

/// Where the results of an experiment go.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GeneralExperimentConfig {
    pub solution_file: String,
    #[serde(default)]
    pub statistics_file: Option<String>,
    /// Final pheromone levels, written for inspection if set.
    #[serde(default)]
    pub pheromone_file: Option<String>,
}
