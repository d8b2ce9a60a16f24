//! Compass headings and their single-letter labels.

use crate::error::RoverError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four cardinal directions a rover can be placed facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    North,
    East,
    South,
    West,
}

impl CompassPoint {
    /// Bearing in degrees, clockwise from north.
    pub fn bearing(self) -> f64 {
        match self {
            Self::North => 0.0,
            Self::East => 90.0,
            Self::South => 180.0,
            Self::West => 270.0,
        }
    }

    /// The cardinal direction for a raw cumulative heading, if it is one.
    ///
    /// Headings are normalized with the Euclidean remainder, so `-90` is west
    /// and `450` is east.
    pub fn from_bearing(degrees: f64) -> Option<Self> {
        match degrees.rem_euclid(360.0) {
            d if d == 0.0 => Some(Self::North),
            d if d == 90.0 => Some(Self::East),
            d if d == 180.0 => Some(Self::South),
            d if d == 270.0 => Some(Self::West),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Case-insensitive lookup of `N`, `E`, `S` or `W`.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

impl FromStr for CompassPoint {
    type Err = RoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_letter(c).ok_or_else(|| RoverError::InvalidHeading(s.to_string()))
            }
            _ => Err(RoverError::InvalidHeading(s.to_string())),
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Display label for a raw heading: the compass letter when the heading is
/// cardinal, otherwise the raw number of degrees.
pub fn heading_label(degrees: f64) -> String {
    match CompassPoint::from_bearing(degrees) {
        Some(point) => point.letter().to_string(),
        None => degrees.to_string(),
    }
}
