//! Rover operations and their command-letter encoding.

use serde::{Deserialize, Serialize};

/// Heading change applied by a single turn, in degrees.
pub const TURN_ANGLE: f64 = 90.0;

/// Distance covered by a single move, in plateau units.
pub const STEP_DISTANCE: f64 = 1.0;

/// Operations a rover understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoverOp {
    /// Rotate 90 degrees counter-clockwise (`L`).
    TurnLeft,
    /// Rotate 90 degrees clockwise (`R`).
    TurnRight,
    /// Drive one unit along the current heading (`M`).
    Move,
    /// No-op: the letter has no registered meaning.
    Ignore,
}

impl RoverOp {
    /// Decodes a command letter. Letters are case-insensitive and anything
    /// outside `L`, `R`, `M` maps to [`RoverOp::Ignore`].
    pub fn from_letter(letter: char) -> Self {
        match letter.to_ascii_uppercase() {
            'L' => Self::TurnLeft,
            'R' => Self::TurnRight,
            'M' => Self::Move,
            _ => Self::Ignore,
        }
    }

    /// Heading delta for turn operations.
    pub fn turn_delta(self) -> Option<f64> {
        match self {
            Self::TurnLeft => Some(-TURN_ANGLE),
            Self::TurnRight => Some(TURN_ANGLE),
            Self::Move | Self::Ignore => None,
        }
    }

    /// Whether this operation starts a motion (and so is refused by a crashed rover).
    pub fn is_motion(self) -> bool {
        !matches!(self, Self::Ignore)
    }
}

/// Decodes a whole command string, preserving order.
pub fn decode_commands(commands: &str) -> impl Iterator<Item = RoverOp> + '_ {
    commands.chars().map(RoverOp::from_letter)
}
