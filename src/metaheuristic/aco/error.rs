use crate::maze::MazeError;

use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum AcoError {
    InvalidParameter(String),
    InvalidPathSpecification(String),
    NoRouteFound { generations: usize },
    Maze(MazeError),
    Statistics(String),
}

impl fmt::Display for AcoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "Invalid colony parameter: {}", msg),
            Self::InvalidPathSpecification(msg) => write!(f, "Invalid path specification: {}", msg),
            Self::NoRouteFound { generations } => write!(
                f,
                "No ant reached the end in {} generation(s).",
                generations
            ),
            Self::Maze(error) => write!(f, "{}", error),
            Self::Statistics(msg) => write!(f, "Could not write statistics: {}", msg),
        }
    }
}

impl Error for AcoError {}

impl From<MazeError> for AcoError {
    fn from(error: MazeError) -> Self {
        Self::Maze(error)
    }
}

impl From<csv::Error> for AcoError {
    fn from(error: csv::Error) -> Self {
        Self::Statistics(error.to_string())
    }
}
