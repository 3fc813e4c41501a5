use crate::grid::{Coordinate, Direction};
use crate::import::ImportError;
use crate::maze::{MazeError, SurroundingPheromone};
use crate::metaheuristic::Route;

use decorum::R64;
use num_traits::identities::{One, Zero};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// A grid maze together with the pheromone field laid over its passable cells.
///
/// Only passable cells carry a pheromone level. Querying a wall or a coordinate outside
/// of the maze yields zero and never creates an entry.
#[derive(Debug, Clone)]
pub struct Maze {
    open: Vec<Vec<bool>>,
    width: usize,
    length: usize,
    pheromones: HashMap<Coordinate, R64>,
}

impl Maze {
    /// Builds a maze from a column major wall layout, `open[x][y]` being true for passable cells.
    pub fn new(open: Vec<Vec<bool>>, width: usize, length: usize) -> Result<Self, MazeError> {
        if open.len() != width {
            return Err(MazeError::InvalidDimensions(format!(
                "expected {} columns, found {}",
                width,
                open.len()
            )));
        }
        if let Some((x, column)) = open.iter().enumerate().find(|(_, c)| c.len() != length) {
            return Err(MazeError::InvalidDimensions(format!(
                "column {} has {} cells instead of {}",
                x,
                column.len(),
                length
            )));
        }

        let mut maze = Maze {
            open,
            width,
            length,
            pheromones: HashMap::new(),
        };
        maze.initialize_pheromones();
        Ok(maze)
    }

    /// Builds a maze from rows of `0`/`1` values as they appear in a maze file.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, MazeError> {
        let length = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(MazeError::InvalidDimensions(format!(
                "row {} has {} cells instead of {}",
                y,
                row.len(),
                width
            )));
        }

        let open = (0..width)
            .map(|x| (0..length).map(|y| rows[y][x] == 1).collect())
            .collect();
        Maze::new(open, width, length)
    }

    /// Reads a maze file: a `width length` header followed by `length` rows of `width` tokens.
    pub fn create_maze<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|_| ImportError::MissingFile(path.display().to_string()))?;
        let maze: Maze = content.parse()?;
        info!(file = %path.display(), width = maze.width, length = maze.length, "Read maze file");
        Ok(maze)
    }

    /// Sets every passable cell to the initial level of 1.
    pub fn initialize_pheromones(&mut self) {
        self.pheromones = HashMap::new();
        for x in 0..self.width {
            for y in 0..self.length {
                if self.open[x][y] {
                    self.pheromones
                        .insert(Coordinate::new(x as i64, y as i64), R64::one());
                }
            }
        }
    }

    /// Resets the field for a new shortest path problem.
    pub fn reset(&mut self) {
        self.initialize_pheromones();
    }

    /// Multiplies every stored level by `1 - rho`.
    pub fn evaporate(&mut self, rho: f64) {
        let factor = R64::from_inner(1.0 - rho);
        for level in self.pheromones.values_mut() {
            *level = *level * factor;
        }
    }

    /// Adds `q / route.size()` once to every distinct cell of the route.
    ///
    /// Nothing is changed if the route is empty or leaves the passable cells.
    pub fn add_pheromone_route(&mut self, route: &Route, q: f64) -> Result<(), MazeError> {
        if route.is_empty() {
            return Err(MazeError::EmptyRoute);
        }
        let delta_tau = R64::from_inner(q / route.size() as f64);

        let mut seen = HashSet::new();
        let mut cells = Vec::new();
        for position in route.iter_coordinates() {
            if !self.pheromones.contains_key(&position) {
                return Err(MazeError::ImpassableCell(position));
            }
            if seen.insert(position) {
                cells.push(position);
            }
        }

        for position in cells {
            if let Some(level) = self.pheromones.get_mut(&position) {
                *level += delta_tau;
            }
        }
        Ok(())
    }

    /// Deposits pheromone for every completed route, unfinished routes are ignored.
    pub fn add_pheromone_routes<'r, I>(&mut self, routes: I, q: f64) -> Result<(), MazeError>
    where
        I: IntoIterator<Item = &'r Route>,
    {
        for route in routes.into_iter().filter(|route| route.done()) {
            self.add_pheromone_route(route, q)?;
        }
        Ok(())
    }

    /// Pheromone level at `position`, zero for walls and out of bounds coordinates.
    pub fn pheromone(&self, position: Coordinate) -> R64 {
        self.pheromones
            .get(&position)
            .copied()
            .unwrap_or_else(R64::zero)
    }

    pub fn surrounding_pheromone(&self, position: Coordinate) -> SurroundingPheromone {
        SurroundingPheromone::new(
            self.pheromone(position.add_direction(Direction::North)),
            self.pheromone(position.add_direction(Direction::East)),
            self.pheromone(position.add_direction(Direction::South)),
            self.pheromone(position.add_direction(Direction::West)),
        )
    }

    pub fn in_bounds(&self, position: Coordinate) -> bool {
        position.x_between(0, self.width as i64) && position.y_between(0, self.length as i64)
    }

    pub fn is_passable(&self, position: Coordinate) -> bool {
        self.in_bounds(position) && self.open[position.x as usize][position.y as usize]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of cells carrying a pheromone level.
    pub fn passable_cells(&self) -> usize {
        self.pheromones.len()
    }

    pub fn iter_pheromones(&self) -> impl Iterator<Item = (&Coordinate, &R64)> {
        self.pheromones.iter()
    }

    /// Dumps the pheromone levels as a tab separated grid, `blocked` cells are written as 0.
    pub fn write_pheromones<W: Write>(
        &self,
        writer: &mut W,
        blocked: &HashSet<Coordinate>,
    ) -> io::Result<()> {
        for y in 0..self.length {
            for x in 0..self.width {
                let position = Coordinate::new(x as i64, y as i64);
                let level = if blocked.contains(&position) {
                    R64::zero()
                } else {
                    self.pheromone(position)
                };
                write!(writer, "{}\t", level.into_inner())?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

/// Maze file representation.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.width, self.length)?;
        for y in 0..self.length {
            let row: Vec<&str> = (0..self.width)
                .map(|x| if self.open[x][y] { "1" } else { "0" })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Maze {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().filter(|line| !line.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| ImportError::InvalidFormat("missing dimension header".to_string()))?;
        let dimensions = header
            .split_whitespace()
            .map(|token| token.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ImportError::InvalidFormat(format!("invalid header '{}'", header)))?;
        let (width, length) = match dimensions.as_slice() {
            [width, length] => (*width, *length),
            _ => {
                return Err(ImportError::InvalidFormat(format!(
                    "invalid header '{}'",
                    header
                )))
            }
        };

        let mut rows = Vec::with_capacity(length);
        for y in 0..length {
            let line = lines
                .next()
                .ok_or_else(|| ImportError::InvalidFormat(format!("missing row {}", y)))?;
            let row = line
                .split_whitespace()
                .map(|token| match token {
                    "0" => Ok(0),
                    "1" => Ok(1),
                    other => Err(ImportError::InvalidFormat(format!(
                        "invalid cell '{}' in row {}",
                        other, y
                    ))),
                })
                .collect::<Result<Vec<u8>, _>>()?;
            if row.len() != width {
                return Err(ImportError::InvalidFormat(format!(
                    "row {} has {} cells instead of {}",
                    y,
                    row.len(),
                    width
                )));
            }
            rows.push(row);
        }

        if width == 0 || length == 0 {
            return Err(ImportError::InvalidFormat("maze is empty".to_string()));
        }
        Maze::from_rows(&rows).map_err(|e| ImportError::InvalidFormat(e.to_string()))
    }
}
