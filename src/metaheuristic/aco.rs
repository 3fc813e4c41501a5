mod ant;
mod error;
mod message;
mod params;
mod supervisor;

pub use ant::Ant;
pub use error::AcoError;
pub use message::Message;
pub use params::{Params, WalkParams, ALPHA, BETA, MAX_ITERATIONS, REVISIT_PENALTY};
pub use supervisor::{GenerationStats, Supervisor};

use crate::grid::PathSpecification;
use crate::maze::Maze;
use crate::metaheuristic::Route;
use crate::rng::{derive_seed, rng64};

use oorandom::Rand64;
use rayon::prelude::*;
use std::io::Write;
use tracing::{debug, info};

/// Ant colony searching short routes through a maze.
///
/// The colony owns the maze mutably, but only mutates the pheromone field between
/// generations. While a generation runs every ant holds a shared borrow of the field.
pub struct Aco<'a, W: Write> {
    maze: &'a mut Maze,
    params: Params,
    best_route: Option<Route>,
    pub supervisor: Supervisor<W>,
    rng: Rand64,
}

impl<'a, W: Write> Aco<'a, W> {
    pub fn new(
        maze: &'a mut Maze,
        params: Params,
        supervisor: Supervisor<W>,
    ) -> Result<Self, AcoError> {
        params.validate()?;

        Ok(Aco {
            maze,
            rng: rng64(params.seed),
            params,
            best_route: None,
            supervisor,
        })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn maze(&self) -> &Maze {
        self.maze
    }

    pub fn best_route(&self) -> Option<&Route> {
        self.best_route.as_ref()
    }

    /// Runs the configured number of generations and returns the shortest completed route.
    pub fn find_shortest_route(&mut self, spec: PathSpecification) -> Result<Route, AcoError> {
        self.find_shortest_route_with(spec, |_| {})
    }

    /// Like [`Aco::find_shortest_route`], calling `on_generation` after every generation.
    pub fn find_shortest_route_with<F>(
        &mut self,
        spec: PathSpecification,
        mut on_generation: F,
    ) -> Result<Route, AcoError>
    where
        F: FnMut(&GenerationStats),
    {
        self.check_spec(&spec)?;
        self.maze.reset();
        self.supervisor.reset();
        self.best_route = None;

        // start equals end: a single ant suffices and the field stays untouched
        if spec.is_degenerate() {
            let route = self
                .run_generation(spec, 0, 1)
                .pop()
                .ok_or(AcoError::NoRouteFound { generations: 0 })?;
            let stats = self.supervisor.aggregate_receive(0, Some(route.size()));
            self.supervisor.write_stats(&stats)?;
            on_generation(&stats);
            return Ok(route);
        }

        for generation in 1..=self.params.generations {
            let stats = self.single_iteration(spec, generation)?;
            on_generation(&stats);
        }

        self.best_route.clone().ok_or(AcoError::NoRouteFound {
            generations: self.params.generations,
        })
    }

    /// Runs one generation of ants on the current field, then evaporates and deposits.
    pub fn single_iteration(
        &mut self,
        spec: PathSpecification,
        generation: usize,
    ) -> Result<GenerationStats, AcoError> {
        let routes = self.run_generation(spec, generation, self.params.ants_per_generation);

        self.maze.evaporate(self.params.evaporation);
        self.maze.add_pheromone_routes(routes.iter(), self.params.q)?;

        self.update_best(routes);

        let best = self.best_route.as_ref().map(Route::size);
        let stats = self.supervisor.aggregate_receive(generation, best);
        self.supervisor.write_stats(&stats)?;

        match (stats.shortest, stats.average, stats.longest) {
            (Some(shortest), Some(average), Some(longest)) => info!(
                generation,
                shortest, average, longest, completed = stats.completed, "Generation finished"
            ),
            _ => info!(generation, ants = stats.ants, "No ant reached the end"),
        }

        Ok(stats)
    }

    /// Keeps the first of the shortest completed routes seen so far.
    fn update_best(&mut self, routes: Vec<Route>) {
        for route in routes.into_iter().filter(|route| route.done()) {
            let improves = match &self.best_route {
                Some(best) => route.shorter_than(best),
                None => true,
            };
            if improves {
                self.best_route = Some(route);
            }
        }
    }

    /// Lets `ant_count` ants walk on a frozen field and waits for every one of them.
    fn run_generation(
        &mut self,
        spec: PathSpecification,
        generation: usize,
        ant_count: usize,
    ) -> Vec<Route> {
        let mut ants = Vec::with_capacity(ant_count);
        for _ in 0..ant_count {
            let (sender, id) = self.supervisor.new_ant();
            let seed = derive_seed(&mut self.rng);
            ants.push(Ant::new(
                &*self.maze,
                spec,
                self.params.walk,
                seed,
                generation,
                sender,
                id,
            ));
        }

        if !self.params.parallel {
            return ants.iter().map(Ant::find_route).collect();
        }

        debug!(generation, ants = ant_count, "Running ants on the thread pool");
        ants.into_par_iter().map(|ant| ant.find_route()).collect()
    }

    fn check_spec(&self, spec: &PathSpecification) -> Result<(), AcoError> {
        for (name, position) in [("start", spec.start()), ("end", spec.end())].iter() {
            if !self.maze.is_passable(*position) {
                return Err(AcoError::InvalidPathSpecification(format!(
                    "{} ({}) is not a passable cell",
                    name, position
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coordinate;
    use csv::Writer;
    use decorum::R64;
    use float_cmp::approx_eq;
    use std::collections::HashMap;
    use std::io::Sink;

    fn open_maze(width: usize, length: usize) -> Maze {
        let rows: Vec<Vec<u8>> = vec![vec![1; width]; length];
        Maze::from_rows(&rows).unwrap()
    }

    fn spec(start: (i64, i64), end: (i64, i64)) -> PathSpecification {
        PathSpecification::new(
            Coordinate::new(start.0, start.1),
            Coordinate::new(end.0, end.1),
        )
    }

    fn colony(maze: &mut Maze, params: Params) -> Aco<'_, Sink> {
        Aco::new(maze, params, Supervisor::default()).unwrap()
    }

    fn levels(maze: &Maze) -> HashMap<Coordinate, R64> {
        maze.iter_pheromones().map(|(c, l)| (*c, *l)).collect()
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut maze = open_maze(3, 3);
        let no_generations = Params::new(5, 0, 10.0, 0.1, Some(1));
        let bad_evaporation = Params::new(5, 1, 10.0, 1.1, Some(1));

        assert!(matches!(
            Aco::new(&mut maze, no_generations, Supervisor::default()),
            Err(AcoError::InvalidParameter(_))
        ));
        assert!(matches!(
            Aco::new(&mut maze, bad_evaporation, Supervisor::default()),
            Err(AcoError::InvalidParameter(_))
        ));
    }

    #[test]
    fn wall_endpoints_are_rejected() {
        let mut maze = Maze::from_rows(&[vec![1, 0], vec![1, 1]]).unwrap();
        let mut aco = colony(&mut maze, Params::new(2, 1, 1.0, 0.1, Some(1)));
        let result = aco.find_shortest_route(spec((0, 0), (1, 0)));

        assert!(matches!(
            result,
            Err(AcoError::InvalidPathSpecification(_))
        ));
    }

    #[test]
    fn open_three_by_three_scenario() {
        let mut maze = open_maze(3, 3);
        let params = Params::new(5, 1, 10.0, 0.1, Some(2021));
        let mut aco = colony(&mut maze, params);
        let mut generations = Vec::new();
        let route = aco
            .find_shortest_route_with(spec((0, 0), (2, 2)), |stats| generations.push(stats.clone()))
            .unwrap();

        assert_eq!(generations.len(), 1);
        let stats = &generations[0];
        assert_eq!(stats.ants, 5);
        assert_eq!(stats.completed, 5, "Every ant should reach the end.");
        assert!(stats.shortest.unwrap() >= 4);
        assert!(route.done());
        assert!(route.size() >= 4);
        assert_eq!(Some(route.size()), stats.shortest);
        assert!(route.size() <= stats.longest.unwrap());
        assert_eq!(route.end_position(), Coordinate::new(2, 2));
    }

    #[test]
    fn degenerate_spec_returns_empty_route_without_touching_field() {
        let mut maze = open_maze(3, 3);
        let before = levels(&maze);
        let params = Params::new(5, 10, 10.0, 0.5, Some(3));
        let route = colony(&mut maze, params)
            .find_shortest_route(spec((1, 1), (1, 1)))
            .unwrap();

        assert!(route.done());
        assert_eq!(route.size(), 0);
        assert_eq!(levels(&maze), before);
    }

    #[test]
    fn unreachable_end_is_an_explicit_failure() {
        let mut maze = Maze::from_rows(&[vec![1, 0, 1]]).unwrap();
        let params = Params::new(3, 2, 10.0, 0.1, Some(3)).with_max_iterations(20);
        let result = colony(&mut maze, params).find_shortest_route(spec((0, 0), (2, 0)));

        assert_eq!(result, Err(AcoError::NoRouteFound { generations: 2 }));
    }

    #[test]
    fn generation_updates_field() {
        // a corridor has exactly one route, so the update is fully determined
        let mut maze = Maze::from_rows(&[vec![1, 1, 1, 1, 1], vec![0, 0, 0, 0, 1]]).unwrap();
        let params = Params::new(2, 1, 8.0, 0.5, Some(4));
        let route = colony(&mut maze, params)
            .find_shortest_route(spec((0, 0), (4, 0)))
            .unwrap();

        assert_eq!(route.size(), 4);
        // 1 * (1 - 0.5) + 2 ants * 8 / 4
        for x in 0..5 {
            let level = maze.pheromone(Coordinate::new(x, 0)).into_inner();
            assert!(approx_eq!(f64, level, 4.5, ulps = 2), "level {} at x = {}", level, x);
        }
        assert!(approx_eq!(
            f64,
            maze.pheromone(Coordinate::new(4, 1)).into_inner(),
            0.5,
            ulps = 2
        ));
    }

    #[test]
    fn sequential_and_parallel_runs_agree() {
        let mut sequential_maze = open_maze(5, 5);
        let mut parallel_maze = open_maze(5, 5);
        let params = Params::new(6, 4, 100.0, 0.3, Some(77));

        let sequential = colony(&mut sequential_maze, params.with_parallel(false))
            .find_shortest_route(spec((0, 0), (4, 4)))
            .unwrap();
        let parallel = colony(&mut parallel_maze, params.with_parallel(true))
            .find_shortest_route(spec((0, 0), (4, 4)))
            .unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(levels(&sequential_maze), levels(&parallel_maze));
    }

    #[test]
    fn best_route_keeps_incumbent_on_ties() {
        use crate::grid::Direction::*;

        let mut maze = open_maze(2, 2);
        let mut aco = colony(&mut maze, Params::new(2, 1, 1.0, 0.1, Some(5)));
        let start = Coordinate::new(0, 0);
        let first = Route::from_moves(start, vec![East, South], true);
        let tie = Route::from_moves(start, vec![South, East], true);
        let longer = Route::from_moves(start, vec![South, East, North, East], true);
        let unfinished = Route::from_moves(start, vec![South], false);

        aco.update_best(vec![first.clone(), tie.clone()]);
        assert_eq!(aco.best_route(), Some(&first));

        aco.update_best(vec![unfinished, tie.clone(), longer]);
        assert_eq!(aco.best_route().map(Route::moves), Some(first.moves()));
    }

    #[test]
    fn best_route_survives_equal_length_generations() {
        // both routes through an open 2x2 grid have length 2
        let mut maze = open_maze(2, 2);
        let mut aco = colony(&mut maze, Params::new(10, 1, 1.0, 0.1, Some(5)));
        let spec = spec((0, 0), (1, 1));
        aco.single_iteration(spec, 1).unwrap();
        let incumbent = aco.best_route().cloned().unwrap();

        for generation in 2..=6 {
            aco.single_iteration(spec, generation).unwrap();
            assert_eq!(aco.best_route().map(Route::moves), Some(incumbent.moves()));
        }
        assert_eq!(incumbent.size(), 2);
    }

    #[test]
    fn degenerate_spec_reports_statistics() {
        let mut maze = open_maze(3, 3);
        let params = Params::new(5, 10, 10.0, 0.5, Some(3));
        let mut aco = Aco::new(&mut maze, params, Supervisor::new(Writer::from_writer(Vec::new())))
            .unwrap();
        let mut reported = Vec::new();
        aco.find_shortest_route_with(spec((1, 1), (1, 1)), |stats| reported.push(stats.clone()))
            .unwrap();
        let output = String::from_utf8(aco.supervisor.into_inner().unwrap()).unwrap();

        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].generation, 0);
        assert_eq!(reported[0].completed, 1);
        assert_eq!(reported[0].shortest, Some(0));
        assert_eq!(output.lines().count(), 2);
        assert!(output.lines().nth(1).unwrap().starts_with("0,1,1,0,"));
    }

    #[test]
    fn statistics_are_written_per_generation() {
        let mut maze = open_maze(4, 4);
        let params = Params::new(4, 3, 10.0, 0.2, Some(8));
        let mut aco = Aco::new(&mut maze, params, Supervisor::new(Writer::from_writer(Vec::new())))
            .unwrap();
        aco.find_shortest_route(spec((0, 0), (3, 3))).unwrap();
        let output = String::from_utf8(aco.supervisor.into_inner().unwrap()).unwrap();

        // header plus one row per generation
        assert_eq!(output.lines().count(), 4);
        assert!(output.lines().nth(1).unwrap().starts_with("1,4,"));
    }

    #[test]
    fn repeated_runs_start_from_uniform_field() {
        let mut maze = open_maze(4, 4);
        let params = Params::new(3, 2, 10.0, 0.2, Some(9));
        let first = colony(&mut maze, params)
            .find_shortest_route(spec((0, 0), (3, 3)))
            .unwrap();
        let second = colony(&mut maze, params)
            .find_shortest_route(spec((0, 0), (3, 3)))
            .unwrap();

        assert_eq!(first, second);
    }
}
