//! # mars-rover
//!
//! A deterministic simulator for robotic rovers exploring a rectangular
//! plateau on Mars.
//!
//! A [`Plateau`] parses mission text into a boundary size and a list of
//! rovers, each with a starting position and a command string over `L`, `R`
//! and `M`. Rovers turn and drive one step at a time and crash for good once
//! they leave the plateau past its far edges. Presentation layers observe
//! every change through [`PlateauObserver`] and pace motions through the
//! [`Rover::step`] function or a [`MissionRun`].

pub mod command;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod heading;
pub mod input;
pub mod mission;
pub mod plateau;
pub mod rover;

pub use command::*;
pub use config::*;
pub use coordinate::*;
pub use error::RoverError;
pub use heading::*;
pub use input::*;
pub use mission::*;
pub use plateau::*;
pub use rover::*;
