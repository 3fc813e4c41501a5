use crate::grid::{Coordinate, Direction};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::io::Write;

/// Sequence of moves taken from a fixed start coordinate.
///
/// Routes behave like a stack while an ant is walking: moves are pushed with [`Route::add`]
/// and undone with [`Route::remove_last`]. `done` is only set if the walk reached its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    start: Coordinate,
    moves: Vec<Direction>,
    done: bool,
}

impl Route {
    pub fn new(start: Coordinate) -> Self {
        Route {
            start,
            moves: Vec::new(),
            done: false,
        }
    }

    pub fn from_moves(start: Coordinate, moves: Vec<Direction>, done: bool) -> Self {
        Route { start, moves, done }
    }

    pub fn add(&mut self, direction: Direction) {
        self.moves.push(direction);
    }

    pub fn remove_last(&mut self) -> Option<Direction> {
        self.moves.pop()
    }

    pub fn last(&self) -> Option<Direction> {
        self.moves.last().copied()
    }

    pub fn size(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn moves(&self) -> &[Direction] {
        &self.moves
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub(crate) fn mark_done(&mut self) {
        self.done = true;
    }

    /// Position reached after applying every move to the start.
    pub fn end_position(&self) -> Coordinate {
        self.moves
            .iter()
            .fold(self.start, |position, &direction| position.add_direction(direction))
    }

    /// Iterates every position of the route, start and end included.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let mut position = self.start;
        std::iter::once(self.start).chain(self.moves.iter().map(move |&direction| {
            position = position.add_direction(direction);
            position
        }))
    }

    /// Ordering used for best route tracking, purely on length.
    pub fn shorter_than(&self, other: &Route) -> bool {
        self.size() < other.size()
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self)
    }
}

/// Solution file representation: length, start and one direction code per line.
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{};", self.size())?;
        writeln!(f, "{};", self.start)?;
        for direction in self.moves.iter() {
            writeln!(f, "{};", direction.code())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn route() -> Route {
        Route::from_moves(Coordinate::new(0, 0), vec![East, East, South, West], true)
    }

    #[test]
    fn add_and_remove_work() {
        let mut route = Route::new(Coordinate::new(1, 1));
        route.add(North);
        route.add(East);

        assert_eq!(route.size(), 2);
        assert_eq!(route.last(), Some(East));
        assert_eq!(route.remove_last(), Some(East));
        assert_eq!(route.remove_last(), Some(North));
        assert_eq!(route.remove_last(), None);
        assert!(route.is_empty());
        assert!(!route.done());
    }

    #[test]
    fn end_position_works() {
        assert_eq!(route().end_position(), Coordinate::new(1, 1));
        assert_eq!(
            Route::new(Coordinate::new(3, 3)).end_position(),
            Coordinate::new(3, 3)
        );
    }

    #[test]
    fn iter_coordinates_works() {
        let coordinates: Vec<Coordinate> = route().iter_coordinates().collect();

        assert_eq!(
            coordinates,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(2, 0),
                Coordinate::new(2, 1),
                Coordinate::new(1, 1),
            ]
        );
    }

    #[test]
    fn shorter_than_is_strict() {
        let long = route();
        let mut short = route();
        short.remove_last();

        assert!(short.shorter_than(&long));
        assert!(!long.shorter_than(&short));
        assert!(!long.shorter_than(&long.clone()));
    }

    #[test]
    fn display_writes_solution_format() {
        let route = Route::from_moves(Coordinate::new(0, 2), vec![East, North], true);

        assert_eq!(route.to_string(), "2;\n0, 2;\n0;\n1;\n");
    }
}
