//! Error types for the rover simulator.

use crate::rover::RoverId;
use thiserror::Error;

/// Everything that can go wrong while placing, commanding or parsing rovers.
#[derive(Error, Debug)]
pub enum RoverError {
    /// Heading letter is not one of N, E, S, W.
    #[error("invalid heading {0:?}, expected one of N, E, S, W")]
    InvalidHeading(String),

    /// Position text does not match `"X Y D"`.
    #[error("invalid rover position {0:?}, expected \"X Y D\" with D one of N, E, S, W")]
    InvalidPositionFormat(String),

    /// Turn or move requested on a crashed rover.
    #[error("rover {rover} crashed at {position} and cannot be commanded")]
    CrashedRoverCommand { rover: RoverId, position: String },

    /// Mission text has a missing or invalid size line, or a dangling position line.
    #[error("malformed mission: {0}")]
    MalformedMission(String),

    /// Rover id is not (or no longer) owned by the plateau.
    #[error("no rover with id {0} on this plateau")]
    UnknownRover(RoverId),

    /// Reading mission or config input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config JSON could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for RoverError {
    fn from(e: serde_json::Error) -> Self {
        RoverError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RoverError>;
