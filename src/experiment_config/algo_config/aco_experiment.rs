use serde::{Deserialize, Serialize};

use crate::experiment_config::Fix;
use crate::metaheuristic::aco::{Params, WalkParams, ALPHA, BETA, MAX_ITERATIONS, REVISIT_PENALTY};
use crate::rng::os_random_seed;

fn default_alpha() -> f64 {
    ALPHA
}

fn default_beta() -> f64 {
    BETA
}

fn default_revisit_penalty() -> f64 {
    REVISIT_PENALTY
}

fn default_max_iterations() -> usize {
    MAX_ITERATIONS
}

fn default_parallel() -> bool {
    true
}

#[derive(Copy, Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct AcoExperiment {
    pub ants_per_generation: usize,
    pub generations: usize,
    pub q: f64,
    pub evaporation: f64,
    pub seed: u64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default = "default_revisit_penalty")]
    pub revisit_penalty: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl AcoExperiment {
    pub fn params(&self) -> Params {
        Params::new(
            self.ants_per_generation,
            self.generations,
            self.q,
            self.evaporation,
            Some(self.seed as u128),
        )
        .with_parallel(self.parallel)
        .with_walk(WalkParams {
            alpha: self.alpha,
            beta: self.beta,
            revisit_penalty: self.revisit_penalty,
            max_iterations: self.max_iterations,
        })
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct UnseededAcoExperiment {
    pub ants_per_generation: usize,
    pub generations: usize,
    pub q: f64,
    pub evaporation: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default = "default_revisit_penalty")]
    pub revisit_penalty: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Fix<AcoExperiment> for UnseededAcoExperiment {
    fn to_fixed(&self) -> AcoExperiment {
        AcoExperiment {
            ants_per_generation: self.ants_per_generation,
            generations: self.generations,
            q: self.q,
            evaporation: self.evaporation,
            seed: (os_random_seed() >> 64) as u64,
            alpha: self.alpha,
            beta: self.beta,
            revisit_penalty: self.revisit_penalty,
            max_iterations: self.max_iterations,
            parallel: self.parallel,
        }
    }
}
