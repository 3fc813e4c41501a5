use crate::grid::Direction;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    pub fn new(x: i64, y: i64) -> Self {
        Coordinate { x, y }
    }

    pub fn add_direction(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Coordinate::new(self.x + dx, self.y + dy)
    }

    pub fn subtract_direction(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Coordinate::new(self.x - dx, self.y - dy)
    }

    /// Squared euclidean distance, kept integral so the goal cell compares exactly.
    pub fn distance_squared(self, other: Coordinate) -> i64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// True if `lower <= x < upper`.
    pub fn x_between(self, lower: i64, upper: i64) -> bool {
        lower <= self.x && self.x < upper
    }

    /// True if `lower <= y < upper`.
    pub fn y_between(self, lower: i64, upper: i64) -> bool {
        lower <= self.y && self.y < upper
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}
