use crate::grid::Coordinate;

use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum MazeError {
    InvalidDimensions(String),
    EmptyRoute,
    ImpassableCell(Coordinate),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions(msg) => write!(f, "Invalid maze dimensions: {}", msg),
            Self::EmptyRoute => write!(f, "Cannot deposit pheromone along an empty route."),
            Self::ImpassableCell(c) => write!(f, "Route leaves the passable cells at ({}).", c),
        }
    }
}

impl Error for MazeError {}
