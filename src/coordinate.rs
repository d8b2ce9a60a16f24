//! Immutable plateau coordinates and compass-bearing projection.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scale used to round projected components to 4 decimal places.
const ROUNDING_SCALE: f64 = 10_000.0;

/// A point on the plateau.
///
/// Coordinates are plain values: copying one never aliases another, and every
/// operation returns a new coordinate instead of mutating in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// The plateau origin, always in bounds.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a coordinate. `NaN` components collapse to 0.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: or_zero(x),
            y: or_zero(y),
        }
    }

    /// Builds a coordinate from loosely typed text, treating anything that is
    /// not a number as 0.
    pub fn from_strs(x: &str, y: &str) -> Self {
        let parse = |s: &str| s.trim().parse::<f64>().unwrap_or(0.0);
        Self::new(parse(x), parse(y))
    }

    /// Returns the point `distance` units away along the compass bearing
    /// `degrees_bearing` (0 = +y, 90 = +x, clockwise).
    ///
    /// The bearing is taken modulo 360 and both components of the result are
    /// rounded to 4 decimal places, so the four cardinal bearings land exactly
    /// on grid points.
    pub fn at(&self, degrees_bearing: f64, distance: f64) -> Self {
        let bearing = or_zero(degrees_bearing).rem_euclid(360.0).to_radians();
        let (sin, cos) = bearing.sin_cos();
        let target = self.as_dvec2() + DVec2::new(sin, cos) * or_zero(distance);
        Self::new(round4(target.x), round4(target.y))
    }

    /// Returns this coordinate as a `glam` vector.
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Coordinate {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Coordinate> for DVec2 {
    fn from(c: Coordinate) -> Self {
        c.as_dvec2()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

fn or_zero(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}

// Adding +0.0 folds a rounded -0.0 into 0.0 so labels never print "-0".
fn round4(v: f64) -> f64 {
    (v * ROUNDING_SCALE).round() / ROUNDING_SCALE + 0.0
}
