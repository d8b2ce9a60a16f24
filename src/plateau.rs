//! The plateau: a bounded grid that owns rovers and runs missions.

use crate::command::{RoverOp, decode_commands};
use crate::config::PlateauConfig;
use crate::coordinate::Coordinate;
use crate::error::{Result, RoverError};
use crate::heading::CompassPoint;
use crate::input::InputAction;
use crate::mission::{MissionPlan, MissionRun, RoverPlacement};
use crate::rover::{Rover, RoverChange, RoverId, RoverSnapshot};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Notification sent to observers after every plateau or rover mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlateauEvent {
    SizeChanged(Coordinate),
    RoverCreated(RoverSnapshot),
    RoverChanged { rover: RoverId, change: RoverChange },
    Cleared,
}

/// Receives [`PlateauEvent`]s, typically to re-render.
///
/// Implemented for any `FnMut(&PlateauEvent)` closure.
pub trait PlateauObserver {
    fn notify(&mut self, event: &PlateauEvent);
}

impl<F> PlateauObserver for F
where
    F: FnMut(&PlateauEvent),
{
    fn notify(&mut self, event: &PlateauEvent) {
        self(event)
    }
}

/// Serializable view of the whole plateau.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlateauSnapshot {
    /// Maximum valid coordinate.
    pub size: Coordinate,
    /// Rendering scale factor.
    pub scale: f64,
    /// Every rover, in creation order.
    pub rovers: Vec<RoverSnapshot>,
}

/// A rectangular plateau from `(0, 0)` to `size`, owning its rovers in
/// creation order. The last rover created is the active one for
/// interactive control.
pub struct Plateau {
    size: Coordinate,
    config: PlateauConfig,
    rovers: Vec<Rover>,
    observers: Vec<Box<dyn PlateauObserver>>,
    /// Bumped by `clear()`; runs launched in an older epoch stop.
    epoch: u64,
}

impl Default for Plateau {
    fn default() -> Self {
        Self::new(Coordinate::ORIGIN)
    }
}

impl fmt::Debug for Plateau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plateau")
            .field("size", &self.size)
            .field("config", &self.config)
            .field("rovers", &self.rovers)
            .field("observers", &self.observers.len())
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl Plateau {
    pub fn new(size: Coordinate) -> Self {
        Self::with_config(size, PlateauConfig::default())
    }

    pub fn with_config(size: Coordinate, config: PlateauConfig) -> Self {
        Self {
            size,
            config,
            rovers: Vec::new(),
            observers: Vec::new(),
            epoch: 0,
        }
    }

    /// The maximum valid coordinate.
    pub fn size(&self) -> Coordinate {
        self.size
    }

    pub fn set_size(&mut self, size: Coordinate) {
        info!("plateau size set to {}", size);
        self.size = size;
        self.emit(&PlateauEvent::SizeChanged(size));
    }

    /// Rendering scale factor.
    pub fn scale(&self) -> f64 {
        self.config.scale
    }

    /// Number of times the plateau has been cleared. Rover ids are only
    /// meaningful within one epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn config(&self) -> &PlateauConfig {
        &self.config
    }

    /// All rovers, in creation order.
    pub fn rovers(&self) -> &[Rover] {
        &self.rovers
    }

    pub fn rover(&self, id: RoverId) -> Option<&Rover> {
        self.rovers.get(id)
    }

    /// The most recently created rover.
    pub fn active_rover(&self) -> Option<&Rover> {
        self.rovers.last()
    }

    /// A command handle for rover `id`, bound to this plateau's bounds.
    pub fn rover_mut(&mut self, id: RoverId) -> Result<RoverMut<'_>> {
        if id >= self.rovers.len() {
            return Err(RoverError::UnknownRover(id));
        }
        Ok(RoverMut { plateau: self, id })
    }

    pub fn active_rover_mut(&mut self) -> Option<RoverMut<'_>> {
        let id = self.rovers.len().checked_sub(1)?;
        Some(RoverMut { plateau: self, id })
    }

    pub fn add_observer<O: PlateauObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Creates a rover at `(x, y)` facing `heading` (`N`, `E`, `S` or `W`,
    /// any case).
    ///
    /// # Errors
    ///
    /// [`RoverError::InvalidHeading`] for any other heading.
    pub fn create_rover(&mut self, x: f64, y: f64, heading: &str) -> Result<RoverMut<'_>> {
        let heading = heading.parse::<CompassPoint>()?;
        Ok(self.place_rover(Coordinate::new(x, y), heading))
    }

    /// Parses `"X Y D"` and creates the rover it describes.
    ///
    /// # Errors
    ///
    /// [`RoverError::InvalidPositionFormat`] if `position` does not match.
    pub fn parse_rover(&mut self, position: &str) -> Result<RoverMut<'_>> {
        let placement = position.parse::<RoverPlacement>()?;
        Ok(self.place_rover(
            Coordinate::new(placement.x, placement.y),
            placement.heading,
        ))
    }

    /// Parses a rover and runs `commands` on it.
    ///
    /// Failures are logged, not returned, so one bad rover never stops the
    /// others. Returns the new rover's id if the position line parsed.
    pub fn parse_rover_command_set(&mut self, position: &str, commands: &str) -> Option<RoverId> {
        let mut rover = match self.parse_rover(position) {
            Ok(rover) => rover,
            Err(err) => {
                error!("skipping rover: {}", err);
                return None;
            }
        };
        let id = rover.id();
        if let Err(err) = rover.process_commands(commands) {
            error!("rover {} mission aborted: {}", id, err);
        }
        Some(id)
    }

    /// Applies the plan's size and creates its rovers, returning a run that
    /// drives their command sequences. Rovers whose position line fails to
    /// parse are logged and skipped.
    pub fn launch(&mut self, plan: &MissionPlan) -> MissionRun {
        self.set_size(plan.size);
        let mut run = MissionRun::new(self.epoch);
        for orders in &plan.rovers {
            match self.parse_rover(&orders.position) {
                Ok(rover) => run.add_rover(rover.id(), &orders.commands),
                Err(err) => error!("skipping rover: {}", err),
            }
        }
        info!("mission launched with {} rover(s)", plan.rovers.len());
        run
    }

    /// Runs a complete mission and returns every rover on the plateau.
    ///
    /// # Errors
    ///
    /// [`RoverError::MalformedMission`] if the mission text cannot be parsed;
    /// nothing is changed in that case. Per-rover failures are logged only.
    pub fn execute(&mut self, mission: &str) -> Result<&[Rover]> {
        let plan = mission.parse::<MissionPlan>()?;
        let mut run = self.launch(&plan);
        run.run_to_end(self);
        Ok(&self.rovers)
    }

    /// Removes every rover. Size and scale are kept.
    pub fn clear(&mut self) {
        info!("clearing {} rover(s)", self.rovers.len());
        self.rovers.clear();
        self.epoch += 1;
        self.emit(&PlateauEvent::Cleared);
    }

    /// Applies an interactive key action. Movement actions target the active
    /// rover and are ignored when there is none.
    ///
    /// # Errors
    ///
    /// [`RoverError::CrashedRoverCommand`] if the active rover has crashed.
    pub fn handle_input(&mut self, action: InputAction) -> Result<()> {
        let Some(op) = action.rover_op() else {
            self.place_rover(Coordinate::ORIGIN, CompassPoint::North);
            return Ok(());
        };
        match self.active_rover_mut() {
            Some(mut rover) => rover.perform(op),
            None => {
                debug!("no active rover, ignoring {:?}", action);
                Ok(())
            }
        }
    }

    /// Decodes a host key name and applies it. Unknown keys are ignored.
    pub fn handle_key(&mut self, key: &str) -> Result<()> {
        match InputAction::from_key(key) {
            Some(action) => self.handle_input(action),
            None => {
                debug!("ignoring key {:?}", key);
                Ok(())
            }
        }
    }

    pub fn snapshot(&self) -> PlateauSnapshot {
        PlateauSnapshot {
            size: self.size,
            scale: self.config.scale,
            rovers: self.rovers.iter().map(Rover::snapshot).collect(),
        }
    }

    fn place_rover(&mut self, position: Coordinate, heading: CompassPoint) -> RoverMut<'_> {
        let id = self.rovers.len();
        let rover = Rover::new(id, position, heading.bearing());
        info!("rover {} created at {}", id, rover);
        let event = PlateauEvent::RoverCreated(rover.snapshot());
        self.rovers.push(rover);
        self.emit(&event);
        RoverMut { plateau: self, id }
    }

    fn emit(&mut self, event: &PlateauEvent) {
        for observer in &mut self.observers {
            observer.notify(event);
        }
    }

    // Forwards the rover's change journal to observers.
    fn flush(&mut self, id: RoverId) {
        let Some(rover) = self.rovers.get_mut(id) else {
            return;
        };
        for change in rover.take_changes() {
            let event = PlateauEvent::RoverChanged { rover: id, change };
            for observer in &mut self.observers {
                observer.notify(&event);
            }
        }
    }
}

/// Mutable access to one rover together with the bounds of the plateau that
/// owns it. Every operation forwards the resulting changes to the plateau's
/// observers.
pub struct RoverMut<'a> {
    plateau: &'a mut Plateau,
    id: RoverId,
}

impl Deref for RoverMut<'_> {
    type Target = Rover;

    fn deref(&self) -> &Rover {
        &self.plateau.rovers[self.id]
    }
}

impl RoverMut<'_> {
    fn apply<T>(&mut self, f: impl FnOnce(&mut Rover, Coordinate) -> T) -> T {
        let bounds = self.plateau.size;
        let out = f(&mut self.plateau.rovers[self.id], bounds);
        self.plateau.flush(self.id);
        out
    }

    pub fn begin(&mut self, op: RoverOp) -> Result<bool> {
        self.apply(|rover, _| rover.begin(op))
    }

    pub fn step(&mut self, progress: f64) {
        self.apply(|rover, bounds| rover.step(progress, bounds))
    }

    pub fn finish(&mut self) {
        self.apply(|rover, bounds| rover.finish(bounds))
    }

    pub fn perform(&mut self, op: RoverOp) -> Result<()> {
        self.apply(|rover, bounds| rover.perform(op, bounds))
    }

    pub fn turn_left(&mut self) -> Result<()> {
        self.perform(RoverOp::TurnLeft)
    }

    pub fn turn_right(&mut self) -> Result<()> {
        self.perform(RoverOp::TurnRight)
    }

    pub fn move_forward(&mut self) -> Result<()> {
        self.perform(RoverOp::Move)
    }

    pub fn process_command(&mut self, letter: char) -> Result<()> {
        self.perform(RoverOp::from_letter(letter))
    }

    /// Runs `commands` in order, stopping at the first failure.
    pub fn process_commands(&mut self, commands: &str) -> Result<&Rover> {
        for op in decode_commands(commands) {
            self.perform(op)?;
        }
        Ok(&**self)
    }
}
