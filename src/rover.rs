//! Rover state and the turn/move step function.
//!
//! A rover is a small state machine: `Idle`, `Moving` while a motion is in
//! flight, and `Crashed` once it has left the plateau. Motions are expressed
//! as a step function over a progress value in `[0, 1]`, so a host can pace
//! them over several frames or apply them atomically with
//! [`Rover::perform`].

use crate::command::{RoverOp, STEP_DISTANCE, decode_commands};
use crate::coordinate::Coordinate;
use crate::error::{Result, RoverError};
use crate::heading::{CompassPoint, heading_label};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a rover in its plateau's rover table.
pub type RoverId = usize;

/// A motion in flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Rotating from `from` degrees by `delta` degrees.
    Turn { from: f64, delta: f64 },
    /// Driving one step from `from` along `bearing`.
    Drive { from: Coordinate, bearing: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ActiveMotion {
    motion: Motion,
    progress: f64,
}

/// A single observable mutation of a rover, recorded in order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoverChange {
    Position(Coordinate),
    Heading(f64),
    Moving(bool),
    Crashed,
}

/// A rover on the plateau.
///
/// Rovers do not know which plateau they belong to. Every operation that can
/// move a rover takes the plateau's `bounds` (its maximum valid coordinate)
/// for the crash check.
#[derive(Clone, Debug)]
pub struct Rover {
    id: RoverId,
    position: Coordinate,
    /// Raw cumulative heading in degrees; never normalized.
    heading: f64,
    crashed: bool,
    motion: Option<ActiveMotion>,
    changes: Vec<RoverChange>,
}

impl Rover {
    /// Creates an idle, uncrashed rover at `position` facing `heading` degrees.
    pub fn new(id: RoverId, position: Coordinate, heading: f64) -> Self {
        Self {
            id,
            position,
            heading,
            crashed: false,
            motion: None,
            changes: Vec::new(),
        }
    }

    /// Index of this rover in its plateau's rover table.
    pub fn id(&self) -> RoverId {
        self.id
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// The cardinal direction the rover faces, if its heading is cardinal.
    pub fn compass(&self) -> Option<CompassPoint> {
        CompassPoint::from_bearing(self.heading)
    }

    /// Once a rover has crashed it stays crashed.
    pub fn is_crashed(&self) -> bool {
        self.crashed
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    pub fn motion(&self) -> Option<Motion> {
        self.motion.map(|m| m.motion)
    }

    /// Progress of the motion in flight.
    pub fn progress(&self) -> Option<f64> {
        self.motion.map(|m| m.progress)
    }

    /// Starts the motion for `op`.
    ///
    /// Returns `Ok(true)` when a motion was started and must be driven with
    /// [`step`](Self::step) / [`finish`](Self::finish). Returns `Ok(false)`
    /// for [`RoverOp::Ignore`] and for re-entrant calls while another motion
    /// is in flight; those are no-ops, not queued.
    ///
    /// # Errors
    ///
    /// [`RoverError::CrashedRoverCommand`] if the rover has crashed.
    pub fn begin(&mut self, op: RoverOp) -> Result<bool> {
        if !op.is_motion() {
            return Ok(false);
        }
        if self.crashed {
            return Err(RoverError::CrashedRoverCommand {
                rover: self.id,
                position: self.grid_label(),
            });
        }
        if self.motion.is_some() {
            debug!("rover {}: ignoring {:?} while already moving", self.id, op);
            return Ok(false);
        }

        let motion = match op.turn_delta() {
            Some(delta) => Motion::Turn {
                from: self.heading,
                delta,
            },
            None => Motion::Drive {
                from: self.position,
                bearing: self.heading,
            },
        };
        debug!("rover {}: begin {:?} at {}", self.id, op, self);
        self.motion = Some(ActiveMotion {
            motion,
            progress: 0.0,
        });
        self.changes.push(RoverChange::Moving(true));
        Ok(true)
    }

    /// Applies the motion in flight at `progress` (clamped to `[0, 1]`), then
    /// runs the crash check against `bounds`. Does nothing when idle.
    pub fn step(&mut self, progress: f64, bounds: Coordinate) {
        let Some(active) = self.motion.as_mut() else {
            return;
        };
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        active.progress = progress;

        match active.motion {
            Motion::Turn { from, delta } => {
                self.heading = from + delta * progress;
                self.changes.push(RoverChange::Heading(self.heading));
            }
            Motion::Drive { from, bearing } => {
                self.position = from.at(bearing, STEP_DISTANCE * progress);
                self.changes.push(RoverChange::Position(self.position));
            }
        }
        self.check_bounds(bounds);
    }

    /// Completes the motion in flight and returns the rover to idle.
    pub fn finish(&mut self, bounds: Coordinate) {
        if self.motion.is_none() {
            return;
        }
        self.step(1.0, bounds);
        self.motion = None;
        self.changes.push(RoverChange::Moving(false));
    }

    /// Runs `op` to completion in one go.
    pub fn perform(&mut self, op: RoverOp, bounds: Coordinate) -> Result<()> {
        if self.begin(op)? {
            self.finish(bounds);
        }
        Ok(())
    }

    /// Rotates 90 degrees counter-clockwise.
    pub fn turn_left(&mut self, bounds: Coordinate) -> Result<()> {
        self.perform(RoverOp::TurnLeft, bounds)
    }

    /// Rotates 90 degrees clockwise.
    pub fn turn_right(&mut self, bounds: Coordinate) -> Result<()> {
        self.perform(RoverOp::TurnRight, bounds)
    }

    /// Drives one unit along the current heading.
    pub fn move_forward(&mut self, bounds: Coordinate) -> Result<()> {
        self.perform(RoverOp::Move, bounds)
    }

    /// Executes a single command letter (`L`, `R`, `M`, any case). Unknown
    /// letters succeed without effect.
    pub fn process_command(&mut self, letter: char, bounds: Coordinate) -> Result<()> {
        self.perform(RoverOp::from_letter(letter), bounds)
    }

    /// Executes `commands` strictly in order, stopping at the first failure.
    pub fn process_commands(&mut self, commands: &str, bounds: Coordinate) -> Result<&Self> {
        for op in decode_commands(commands) {
            self.perform(op, bounds)?;
        }
        Ok(self)
    }

    /// Drains the mutations recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<RoverChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn snapshot(&self) -> RoverSnapshot {
        RoverSnapshot {
            id: self.id,
            x: self.position.x,
            y: self.position.y,
            heading: self.heading,
            crashed: self.crashed,
            moving: self.is_moving(),
            label: self.to_string(),
        }
    }

    // Only the high edges are checked: negative coordinates never crash.
    fn check_bounds(&mut self, bounds: Coordinate) {
        if self.crashed {
            return;
        }
        if self.position.x.floor() > bounds.x || self.position.y.floor() > bounds.y {
            self.crashed = true;
            self.changes.push(RoverChange::Crashed);
            warn!(
                "rover {} crashed at {} (plateau bounds {})",
                self.id, self.position, bounds
            );
        }
    }

    fn grid_label(&self) -> String {
        format!("{} {}", self.position.x, self.position.y)
    }
}

impl fmt::Display for Rover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.crashed {
            write!(f, "Crashed at ")?;
        }
        write!(f, "{} {}", self.grid_label(), heading_label(self.heading))
    }
}

/// Serializable view of a rover for presentation layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoverSnapshot {
    /// Index in the plateau's rover table.
    pub id: RoverId,
    pub x: f64,
    pub y: f64,
    /// Raw cumulative heading in degrees.
    pub heading: f64,
    /// True once the rover has left the plateau.
    pub crashed: bool,
    /// True while a turn or move is in flight.
    pub moving: bool,
    /// Display text, e.g. `"1 3 N"` or `"Crashed at 5 6 N"`.
    pub label: String,
}
