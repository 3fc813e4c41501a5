pub mod experiment;
pub mod experiment_config;
pub mod grid;
pub mod import;
pub mod maze;
pub mod metaheuristic;
pub mod rng;
