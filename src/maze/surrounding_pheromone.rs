use crate::grid::Direction;

use decorum::R64;

/// Pheromone levels of the four neighbors of a cell.
/// Unknown or impassable neighbors report zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurroundingPheromone {
    pub north: R64,
    pub east: R64,
    pub south: R64,
    pub west: R64,
}

impl SurroundingPheromone {
    pub fn new(north: R64, east: R64, south: R64, west: R64) -> Self {
        SurroundingPheromone {
            north,
            east,
            south,
            west,
        }
    }

    pub fn get(&self, direction: Direction) -> R64 {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    pub fn total(&self) -> R64 {
        self.north + self.east + self.south + self.west
    }
}
