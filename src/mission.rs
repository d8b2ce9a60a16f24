//! Mission text parsing and the cooperative mission scheduler.
//!
//! A mission is a plateau size followed by pairs of lines, one position line
//! and one command line per rover:
//!
//! ```text
//! 5 5
//! 1 2 N
//! LMLMLMLMM
//! 3 3 E
//! MMRMMRMRRM
//! ```
//!
//! [`MissionRun`] drives every rover of a mission side by side. Each tick
//! advances every unfinished rover by one animation frame; within a rover,
//! commands run strictly one after another.

use crate::command::{RoverOp, decode_commands};
use crate::coordinate::Coordinate;
use crate::error::{Result, RoverError};
use crate::heading::CompassPoint;
use crate::plateau::Plateau;
use crate::rover::RoverId;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;

/// Initial placement of a rover, parsed from `"X Y D"`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoverPlacement {
    pub x: f64,
    pub y: f64,
    pub heading: CompassPoint,
}

impl FromStr for RoverPlacement {
    type Err = RoverError;

    /// Accepts two integers and a compass letter (any case), separated by
    /// whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RoverError::InvalidPositionFormat(s.to_string());
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [x, y, heading] = tokens.as_slice() else {
            return Err(invalid());
        };
        let x = x.parse::<i64>().map_err(|_| invalid())?;
        let y = y.parse::<i64>().map_err(|_| invalid())?;
        let heading = heading.parse::<CompassPoint>().map_err(|_| invalid())?;
        Ok(Self {
            x: x as f64,
            y: y as f64,
            heading,
        })
    }
}

/// One rover's part of a mission, kept as raw text so that a bad position
/// line fails only that rover.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverOrders {
    pub position: String,
    pub commands: String,
}

/// A parsed mission: plateau size plus rover orders in input order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MissionPlan {
    pub size: Coordinate,
    pub rovers: Vec<RoverOrders>,
}

impl FromStr for MissionPlan {
    type Err = RoverError;

    /// # Errors
    ///
    /// [`RoverError::MalformedMission`] when the size line is missing or is
    /// not two integers, or when the last rover has no command line.
    fn from_str(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let size_line = lines
            .next()
            .filter(|line| !line.trim().is_empty())
            .ok_or_else(|| RoverError::MalformedMission("missing plateau size line".into()))?;
        let size = parse_size(size_line)?;

        let mut rest: Vec<&str> = lines.collect();
        let blank_tail = rest.last().is_some_and(|line| line.trim().is_empty());
        while rest.last().is_some_and(|line| line.trim().is_empty()) {
            rest.pop();
        }
        // A blank line after a lone position line is that rover's empty command line.
        if blank_tail && rest.len() % 2 != 0 {
            rest.push("");
        }
        if rest.len() % 2 != 0 {
            return Err(RoverError::MalformedMission(format!(
                "rover position {:?} has no command line",
                rest[rest.len() - 1].trim()
            )));
        }

        let rovers = rest
            .chunks_exact(2)
            .map(|pair| RoverOrders {
                position: pair[0].trim().to_string(),
                commands: pair[1].trim().to_string(),
            })
            .collect();

        Ok(Self { size, rovers })
    }
}

fn parse_size(line: &str) -> Result<Coordinate> {
    let malformed = || RoverError::MalformedMission(format!("invalid plateau size {:?}", line));
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [x, y] = tokens.as_slice() else {
        return Err(malformed());
    };
    let x = x.parse::<i64>().map_err(|_| malformed())?;
    let y = y.parse::<i64>().map_err(|_| malformed())?;
    Ok(Coordinate::new(x as f64, y as f64))
}

/// A rover's pending command queue inside a running mission.
#[derive(Clone, Debug)]
struct Lane {
    rover: RoverId,
    pending: VecDeque<RoverOp>,
    frame: u32,
    done: bool,
}

impl Lane {
    fn new(rover: RoverId, commands: &str) -> Self {
        Self {
            rover,
            pending: decode_commands(commands).collect(),
            frame: 0,
            done: false,
        }
    }

    fn advance(&mut self, plateau: &mut Plateau, epoch: u64, frames: u32) -> Result<()> {
        // Ids are reused after `clear()`, so a stale lane must not touch the new rovers.
        if plateau.epoch() != epoch {
            return Err(RoverError::UnknownRover(self.rover));
        }
        let mut rover = plateau.rover_mut(self.rover)?;

        if !rover.is_moving() {
            loop {
                let Some(op) = self.pending.pop_front() else {
                    self.done = true;
                    return Ok(());
                };
                if rover.begin(op)? {
                    self.frame = 0;
                    break;
                }
            }
        }

        self.frame += 1;
        if self.frame >= frames {
            rover.finish();
            self.done = self.pending.is_empty();
        } else {
            rover.step(f64::from(self.frame) / f64::from(frames));
        }
        Ok(())
    }
}

/// Mission in progress. Obtained from [`Plateau::launch`].
#[derive(Clone, Debug, Default)]
pub struct MissionRun {
    lanes: Vec<Lane>,
    /// Plateau epoch at launch.
    epoch: u64,
    ticks: usize,
    failures: Vec<RoverId>,
}

impl MissionRun {
    pub(crate) fn new(epoch: u64) -> Self {
        Self {
            epoch,
            ..Self::default()
        }
    }

    pub(crate) fn add_rover(&mut self, rover: RoverId, commands: &str) {
        self.lanes.push(Lane::new(rover, commands));
    }

    pub fn is_finished(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Ticks elapsed so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Rovers whose command sequence was aborted by an error.
    pub fn failures(&self) -> &[RoverId] {
        &self.failures
    }

    /// Advances every unfinished rover by one frame. Returns `true` while
    /// any rover still has work left.
    ///
    /// A rover whose command fails is logged and dropped from the run; the
    /// other rovers carry on.
    pub fn tick(&mut self, plateau: &mut Plateau) -> bool {
        if self.lanes.is_empty() {
            return false;
        }
        let frames = plateau.config().frames();
        self.ticks += 1;

        for lane in &mut self.lanes {
            if let Err(err) = lane.advance(plateau, self.epoch, frames) {
                error!("rover {} mission aborted: {}", lane.rover, err);
                self.failures.push(lane.rover);
                lane.pending.clear();
                lane.done = true;
            }
        }
        self.lanes.retain(|lane| !lane.done);
        debug!("tick {}: {} rover(s) still running", self.ticks, self.lanes.len());
        !self.lanes.is_empty()
    }

    /// Ticks until every rover has finished or failed.
    pub fn run_to_end(&mut self, plateau: &mut Plateau) {
        while self.tick(plateau) {}
        info!(
            "mission finished after {} tick(s), {} failure(s)",
            self.ticks,
            self.failures.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classic_mission() {
        let plan: MissionPlan = "5 5\n1 2 N\nLMLMLMLMM\n3 3 E\nMMRMMRMRRM\n".parse().unwrap();
        assert_eq!(plan.size, Coordinate::new(5.0, 5.0));
        assert_eq!(plan.rovers.len(), 2);
        assert_eq!(plan.rovers[1].position, "3 3 E");
        assert_eq!(plan.rovers[1].commands, "MMRMMRMRRM");
    }

    #[test]
    fn test_crlf_and_empty_command_line() {
        let plan: MissionPlan = "5 5\r\n1 2 N\r\n\r\n".parse().unwrap();
        assert_eq!(plan.rovers.len(), 1);
        assert_eq!(plan.rovers[0].commands, "");
    }

    #[test]
    fn test_trailing_blank_lines_are_ignored() {
        let plan: MissionPlan = "5 5\n1 2 N\nLMLMLMLMM\n\n  \n".parse().unwrap();
        assert_eq!(plan.rovers.len(), 1);
        assert_eq!(plan.rovers[0].commands, "LMLMLMLMM");

        let plan: MissionPlan = "5 5\n1 2 N\nM\n3 3 E\n\n\n".parse().unwrap();
        assert_eq!(plan.rovers.len(), 2);
        assert_eq!(plan.rovers[1].commands, "");
    }

    #[test]
    fn test_size_only_mission_has_no_rovers() {
        let plan: MissionPlan = "3 4".parse().unwrap();
        assert_eq!(plan.size, Coordinate::new(3.0, 4.0));
        assert!(plan.rovers.is_empty());
    }

    #[test]
    fn test_malformed_missions() {
        for text in ["", "\n1 2 N\nM", "five 5", "5", "5 5 5", "5 5\n1 2 N"] {
            assert!(
                matches!(text.parse::<MissionPlan>(), Err(RoverError::MalformedMission(_))),
                "expected {:?} to be rejected",
                text
            );
        }
    }

    #[test]
    fn test_placement_parsing() {
        let p: RoverPlacement = "1 2 n".parse().unwrap();
        assert_eq!((p.x, p.y, p.heading), (1.0, 2.0, CompassPoint::North));

        for bad in ["1 2 X", "abc", "1 2", "1 2 N M", "1.5 2 N", "a b N"] {
            assert!(matches!(
                bad.parse::<RoverPlacement>(),
                Err(RoverError::InvalidPositionFormat(_))
            ));
        }
    }
}
