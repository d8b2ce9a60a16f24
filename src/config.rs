//! Plateau configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Configuration for a [`Plateau`](crate::Plateau).
///
/// Nothing here changes rover physics: a move is always one unit and a turn
/// always 90 degrees. These settings only affect presentation and pacing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateauConfig {
    /// Rendering scale factor, exposed read-only to presentation layers.
    pub scale: f64,
    /// Number of scheduler ticks one turn or move is spread over.
    /// 0 behaves like 1.
    pub frames_per_step: u32,
}

impl Default for PlateauConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            frames_per_step: 1,
        }
    }
}

impl PlateauConfig {
    /// Parses a JSON config. Missing fields take their default values.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Frames per step, never less than 1.
    pub fn frames(&self) -> u32 {
        self.frames_per_step.max(1)
    }
}
