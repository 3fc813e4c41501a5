use crate::grid::Coordinate;
use crate::import::ImportError;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Start and end of a path finding problem. Start and end may coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSpecification {
    start: Coordinate,
    end: Coordinate,
}

impl PathSpecification {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        PathSpecification { start, end }
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn end(&self) -> Coordinate {
        self.end
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Reads a coordinates file of the form `x, y;` (start) followed by `x, y;` (end).
    pub fn read_coordinates<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|_| ImportError::MissingFile(path.display().to_string()))?;
        content.parse()
    }
}

fn parse_coordinate(token: &str) -> Result<Coordinate, ImportError> {
    let mut parts = token.split(',').map(str::trim);
    let mut next = || -> Result<i64, ImportError> {
        parts
            .next()
            .filter(|part| !part.is_empty())
            .ok_or_else(|| ImportError::InvalidFormat(format!("incomplete coordinate '{}'", token)))?
            .parse()
            .map_err(|_| ImportError::InvalidFormat(format!("invalid coordinate '{}'", token)))
    };
    let x = next()?;
    let y = next()?;
    Ok(Coordinate::new(x, y))
}

impl FromStr for PathSpecification {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coordinates = s
            .split(';')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(parse_coordinate)
            .collect::<Result<Vec<_>, _>>()?;

        match coordinates.as_slice() {
            [start, end] => Ok(PathSpecification::new(*start, *end)),
            _ => Err(ImportError::InvalidFormat(format!(
                "expected two coordinates, found {}",
                coordinates.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_works() {
        let spec: PathSpecification = "0, 0;\n9, 14;\n".parse().unwrap();

        assert_eq!(spec.start(), Coordinate::new(0, 0));
        assert_eq!(spec.end(), Coordinate::new(9, 14));
        assert!(!spec.is_degenerate());
    }

    #[test]
    fn parse_errors_on_missing_end() {
        let result = "0, 0;".parse::<PathSpecification>();

        assert!(matches!(result, Err(ImportError::InvalidFormat(_))));
    }

    #[test]
    fn parse_errors_on_garbage() {
        let result = "0, a;\n1, 1;".parse::<PathSpecification>();

        assert!(matches!(result, Err(ImportError::InvalidFormat(_))));
    }

    #[test]
    fn degenerate_works() {
        let c = Coordinate::new(2, 2);
        assert!(PathSpecification::new(c, c).is_degenerate());
    }

    #[test]
    fn missing_file_errors() {
        let result = PathSpecification::read_coordinates("does/not/exist.txt");

        assert_eq!(
            result,
            Err(ImportError::MissingFile("does/not/exist.txt".to_string()))
        );
    }
}
