//! Interactive single-key control.

use crate::command::RoverOp;
use serde::{Deserialize, Serialize};

/// A decoded key press for interactive mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Create a rover at the origin facing north; it becomes the active rover.
    NewRover,
    TurnLeft,
    Forward,
    TurnRight,
}

impl InputAction {
    /// Decodes a host key name (`"ArrowUp"`, `"m"`, ...). Unrecognized keys
    /// yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::TurnLeft),
            "ArrowUp" => Some(Self::Forward),
            "ArrowRight" => Some(Self::TurnRight),
            _ if key.eq_ignore_ascii_case("n") => Some(Self::NewRover),
            _ if key.eq_ignore_ascii_case("l") => Some(Self::TurnLeft),
            _ if key.eq_ignore_ascii_case("m") => Some(Self::Forward),
            _ if key.eq_ignore_ascii_case("r") => Some(Self::TurnRight),
            _ => None,
        }
    }

    /// The rover operation this action dispatches to the active rover, or
    /// `None` for [`InputAction::NewRover`].
    pub fn rover_op(self) -> Option<RoverOp> {
        match self {
            Self::NewRover => None,
            Self::TurnLeft => Some(RoverOp::TurnLeft),
            Self::Forward => Some(RoverOp::Move),
            Self::TurnRight => Some(RoverOp::TurnRight),
        }
    }
}
