mod aco_experiment;

use serde::{Deserialize, Serialize};

use crate::experiment_config::Fix;
pub use aco_experiment::{AcoExperiment, UnseededAcoExperiment};

#[derive(Deserialize, Serialize, Debug)]
#[serde(untagged)]
pub enum AlgoConfig {
    Aco(AcoExperiment),
    UnseededAco(UnseededAcoExperiment),
}

impl AlgoConfig {
    /// The colony config, with a fresh OS seed if none was given.
    pub fn aco(&self) -> AcoExperiment {
        match self {
            AlgoConfig::Aco(aco) => *aco,
            AlgoConfig::UnseededAco(usaco) => usaco.to_fixed(),
        }
    }
}
