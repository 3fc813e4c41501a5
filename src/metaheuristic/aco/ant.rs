use crate::grid::{Coordinate, Direction, PathSpecification};
use crate::maze::Maze;
use crate::metaheuristic::aco::{Message, WalkParams};
use crate::metaheuristic::Route;
use crate::rng::{rng64, UniformSource};

use decorum::{Real, R64};
use num_traits::identities::Zero;
use std::collections::HashSet;
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::debug;

/// State of a single walk. Owned by exactly one ant and dropped once its route is returned.
#[derive(Debug)]
struct Walk {
    route: Route,
    current: Coordinate,
    previous: Coordinate,
    forbidden: Option<Direction>,
    /// Dead ends, never entered again during this walk.
    blocked: HashSet<Coordinate>,
    /// Open path prefix, start first. Always mirrors the positions of `route`.
    visited: Vec<Coordinate>,
    on_path: HashSet<Coordinate>,
    /// Every position ever stepped on. Never shrinks.
    seen: HashSet<Coordinate>,
    iterations: usize,
    evaluations: usize,
    backtracks: usize,
    loops_removed: usize,
}

impl Walk {
    fn new(start: Coordinate) -> Self {
        let mut walk = Walk {
            route: Route::new(start),
            current: start,
            previous: start,
            forbidden: None,
            blocked: HashSet::new(),
            visited: Vec::new(),
            on_path: HashSet::new(),
            seen: HashSet::new(),
            iterations: 0,
            evaluations: 0,
            backtracks: 0,
            loops_removed: 0,
        };
        walk.visit(start);
        walk
    }

    fn visit(&mut self, position: Coordinate) {
        self.visited.push(position);
        self.on_path.insert(position);
        self.seen.insert(position);
    }

    fn step(&mut self, direction: Direction) {
        self.route.add(direction);
        self.previous = self.current;
        self.current = self.current.add_direction(direction);
        self.forbidden = None;
    }

    /// Undoes the last move without touching the open path.
    fn undo_step(&mut self) -> Option<Direction> {
        let direction = self.route.remove_last()?;
        self.current = self.current.subtract_direction(direction);
        Some(direction)
    }

    /// Leaves the current position, which is the tip of the open path, backwards.
    fn retreat(&mut self) -> Option<Direction> {
        let direction = self.undo_step()?;
        if let Some(left) = self.visited.pop() {
            self.on_path.remove(&left);
        }
        Some(direction)
    }

    /// Position one step behind the current one on the route, or `start` for an empty route.
    fn previous_position(&self, start: Coordinate) -> Coordinate {
        match self.route.last() {
            Some(direction) => self.current.subtract_direction(direction),
            None => start,
        }
    }

    /// Restores `previous` and `forbidden` after the route was unwound.
    /// An empty route puts the ant back into its initial state.
    fn settle(&mut self, start: Coordinate, forbidden: Option<Direction>) {
        self.forbidden = if self.route.is_empty() { None } else { forbidden };
        self.previous = self.previous_position(start);
    }
}

/// A single agent walking from the start to the end of a path specification.
///
/// The ant only reads the maze. Its randomness is derived from `rng_seed`, so two ants with
/// the same seed on the same field walk the same route.
pub struct Ant<'a> {
    maze: &'a Maze,
    spec: PathSpecification,
    params: WalkParams,
    rng_seed: u128,
    generation: usize,
    sender: Sender<Message>,
    id: usize,
}

impl<'a> Ant<'a> {
    pub fn new(
        maze: &'a Maze,
        spec: PathSpecification,
        params: WalkParams,
        rng_seed: u128,
        generation: usize,
        sender: Sender<Message>,
        id: usize,
    ) -> Self {
        Ant {
            maze,
            spec,
            params,
            rng_seed,
            generation,
            sender,
            id,
        }
    }

    /// Performs a single run through the maze using the ant's own seeded generator.
    pub fn find_route(&self) -> Route {
        let mut rng = rng64(self.rng_seed);
        self.find_route_with(&mut rng)
    }

    /// Performs a single run through the maze drawing from `rng` and reports it to the supervisor.
    pub fn find_route_with<R: UniformSource>(&self, rng: &mut R) -> Route {
        let start_time = Instant::now();
        let walk = self.walk(rng);

        let message = Message::new(
            self.id,
            self.generation,
            walk.route.size(),
            walk.route.done(),
            walk.evaluations,
            walk.iterations,
            walk.backtracks,
            walk.loops_removed,
            start_time.elapsed(),
        );
        if let Err(error) = self.sender.send(message) {
            debug!(ant = self.id, error = %error, "Supervisor stopped listening");
        }

        walk.route
    }

    fn walk<R: UniformSource>(&self, rng: &mut R) -> Walk {
        let mut walk = Walk::new(self.spec.start());

        loop {
            if walk.current == self.spec.end() {
                walk.route.mark_done();
                break;
            }
            if walk.iterations >= self.params.max_iterations {
                debug!(
                    ant = self.id,
                    generation = self.generation,
                    iterations = walk.iterations,
                    blocked = walk.blocked.len(),
                    "Ant ran out of iterations"
                );
                break;
            }
            walk.iterations += 1;

            let weights = self.weights(&mut walk);
            match choose(&weights, rng) {
                None => self.backtrack(&mut walk),
                Some(direction) => {
                    walk.step(direction);
                    if walk.on_path.contains(&walk.current) {
                        self.remove_loop(&mut walk);
                    } else {
                        let current = walk.current;
                        walk.visit(current);
                    }
                }
            }
        }

        walk
    }

    /// Move weights of every eligible direction with a nonzero weight, in N, E, S, W order.
    ///
    /// A direction is eligible unless it leads back to the previous position, equals the
    /// forbidden direction or leads into a blocked cell.
    fn weights(&self, walk: &mut Walk) -> Vec<(Direction, R64)> {
        let surrounding = self.maze.surrounding_pheromone(walk.current);
        let mut weights = Vec::with_capacity(4);

        for &direction in Direction::ALL.iter() {
            let destination = walk.current.add_direction(direction);
            if destination == walk.previous
                || Some(direction) == walk.forbidden
                || walk.blocked.contains(&destination)
            {
                continue;
            }

            let pheromone = surrounding.get(direction);
            if pheromone == R64::zero() {
                continue;
            }
            walk.evaluations += 1;

            let mut weight = self.weight(pheromone, destination);
            if walk.seen.contains(&destination) {
                weight = weight * R64::from_inner(self.params.revisit_penalty);
            }
            if weight > R64::zero() {
                weights.push((direction, weight));
            }
        }

        weights
    }

    fn weight(&self, pheromone: R64, destination: Coordinate) -> R64 {
        // the goal cell itself has distance 0, it counts as distance 1
        let distance = destination.distance_squared(self.spec.end()).max(1);
        let desirability = R64::from_inner(1.0 / distance as f64);

        R64::powf(pheromone, R64::from_inner(self.params.alpha))
            * R64::powf(desirability, R64::from_inner(self.params.beta))
    }

    /// Number of neighbors with pheromone on them that are not blocked.
    fn degree(&self, walk: &Walk) -> usize {
        Direction::ALL
            .iter()
            .map(|&direction| walk.current.add_direction(direction))
            .filter(|destination| {
                self.maze.pheromone(*destination) > R64::zero() && !walk.blocked.contains(destination)
            })
            .count()
    }

    /// Walks back out of a dead end, blocking every cell left on the way, until a position
    /// with at least two ways out or the start is reached.
    fn backtrack(&self, walk: &mut Walk) {
        walk.backtracks += 1;
        let start = self.spec.start();
        let mut forbidden = None;

        while self.degree(walk) < 2 && walk.current != start {
            walk.blocked.insert(walk.current);
            match walk.retreat() {
                Some(direction) => forbidden = Some(direction),
                None => break,
            }
        }

        walk.settle(start, forbidden);
    }

    /// The ant just stepped onto a cell of its open path. Unwinds the route back to that
    /// cell so the route stays free of cycles.
    fn remove_loop(&self, walk: &mut Walk) {
        walk.loops_removed += 1;
        let start = self.spec.start();
        let loop_point = walk.current;

        let mut forbidden = walk.undo_step();
        // the cell closing the loop is only a connector if it has no third way out
        if self.degree(walk) <= 2 {
            walk.blocked.insert(walk.current);
        }

        while walk.current != loop_point {
            match walk.retreat() {
                Some(direction) => forbidden = Some(direction),
                None => break,
            }
        }

        walk.settle(start, forbidden);
    }
}

/// Weighted random choice, each direction is picked with probability proportional to its weight.
fn choose<R: UniformSource>(weights: &[(Direction, R64)], rng: &mut R) -> Option<Direction> {
    let (last, _) = *weights.last()?;
    let total = weights
        .iter()
        .fold(R64::zero(), |acc, (_, weight)| acc + *weight);
    let rand = R64::from_inner(rng.rand_float()) * total;

    let mut sum = R64::zero();
    for &(direction, weight) in weights.iter() {
        sum += weight;
        if sum > rand {
            return Some(direction);
        }
    }

    // rounding may leave `sum` marginally below `rand`
    Some(last)
}
