use crate::metaheuristic::aco::AcoError;
use crate::rng::os_random_seed;

/// Influence of the pheromone level on the move weight.
pub const ALPHA: f64 = 1.0;
/// Influence of the distance to the goal on the move weight.
pub const BETA: f64 = 0.2;
/// Weight factor applied to cells the ant already stepped on during its walk.
pub const REVISIT_PENALTY: f64 = 0.1;
/// Number of loop passes an ant may take before it gives up.
pub const MAX_ITERATIONS: usize = 60000;

/// Parameters of a single ant walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkParams {
    pub alpha: f64,
    pub beta: f64,
    pub revisit_penalty: f64,
    pub max_iterations: usize,
}

impl Default for WalkParams {
    fn default() -> Self {
        WalkParams {
            alpha: ALPHA,
            beta: BETA,
            revisit_penalty: REVISIT_PENALTY,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

/// Parameters of the colony.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub ants_per_generation: usize,
    pub generations: usize,
    /// Normalization factor for the amount of dropped pheromone.
    pub q: f64,
    pub evaporation: f64,
    pub seed: u128,
    /// Run the ants of a generation on their own threads.
    pub parallel: bool,
    pub walk: WalkParams,
}

impl Params {
    pub fn new(
        ants_per_generation: usize,
        generations: usize,
        q: f64,
        evaporation: f64,
        seed: Option<u128>,
    ) -> Self {
        Params {
            ants_per_generation,
            generations,
            q,
            evaporation,
            seed: seed.unwrap_or_else(os_random_seed),
            parallel: true,
            walk: WalkParams::default(),
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_walk(mut self, walk: WalkParams) -> Self {
        self.walk = walk;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.walk.max_iterations = max_iterations;
        self
    }

    /// Rejects parameter sets no run can be started with.
    pub fn validate(&self) -> Result<(), AcoError> {
        if self.generations == 0 {
            return Err(AcoError::InvalidParameter(
                "generation count must be positive".to_string(),
            ));
        }
        if self.ants_per_generation == 0 {
            return Err(AcoError::InvalidParameter(
                "ant count must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.evaporation) {
            return Err(AcoError::InvalidParameter(format!(
                "evaporation rate {} is outside of [0, 1]",
                self.evaporation
            )));
        }
        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(AcoError::InvalidParameter(format!(
                "q must be positive, got {}",
                self.q
            )));
        }
        if self.walk.max_iterations == 0 {
            return Err(AcoError::InvalidParameter(
                "iteration cap must be positive".to_string(),
            ));
        }
        if !self.walk.alpha.is_finite() || !self.walk.beta.is_finite() {
            return Err(AcoError::InvalidParameter(
                "alpha and beta must be finite".to_string(),
            ));
        }
        if !(self.walk.revisit_penalty > 0.0 && self.walk.revisit_penalty <= 1.0) {
            return Err(AcoError::InvalidParameter(format!(
                "revisit penalty {} is outside of (0, 1]",
                self.walk.revisit_penalty
            )));
        }
        Ok(())
    }
}
