mod coordinate;
mod direction;
mod path_specification;

pub use coordinate::Coordinate;
pub use direction::Direction;
pub use path_specification::PathSpecification;
