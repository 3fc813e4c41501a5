mod error;
mod maze;
mod surrounding_pheromone;

pub use error::MazeError;
pub use maze::Maze;
pub use surrounding_pheromone::SurroundingPheromone;
