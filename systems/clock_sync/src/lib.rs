#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stage-indexed clock display applied to every generated room.

use lucid_core::{objects, ContentError, StageIndex};
use lucid_room::Room;
use serde::{Deserialize, Serialize};

/// Rotation the analog hour hand advances per stage.
pub const HOUR_HAND_DEGREES_PER_STAGE: f32 = 30.0;

/// Tunable parameters of the clock display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Rotation of the hour hand at stage zero.
    pub base_rotation_degrees: f32,
}

/// Values written to the room clocks for a stage.
#[derive(Clone, Debug, PartialEq)]
pub struct ClockReading {
    /// Rotation applied to the analog hour hand.
    pub rotation_degrees: f32,
    /// Text shown on the digital display.
    pub display: String,
}

/// Pure system mapping a stage onto the room's two clocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockSync {
    base_rotation_degrees: f32,
}

impl ClockSync {
    /// Creates the system from its configuration.
    #[must_use]
    pub const fn new(config: ClockConfig) -> Self {
        Self {
            base_rotation_degrees: config.base_rotation_degrees,
        }
    }

    /// Values the clocks show at `stage`.
    #[must_use]
    pub fn reading(&self, stage: StageIndex) -> ClockReading {
        ClockReading {
            rotation_degrees: self.rotation_for(stage),
            display: display_for(stage),
        }
    }

    /// Hour hand rotation at `stage`.
    #[must_use]
    pub fn rotation_for(&self, stage: StageIndex) -> f32 {
        self.base_rotation_degrees + HOUR_HAND_DEGREES_PER_STAGE * stage.get() as f32
    }

    /// Writes the stage reading into the room's clock objects.
    pub fn set_clock(
        &self,
        room: &mut Room,
        stage: StageIndex,
    ) -> Result<ClockReading, ContentError> {
        let reading = self.reading(stage);
        room.object_mut(objects::CLOCK_HOUR_HAND)?
            .set_rotation_degrees(reading.rotation_degrees);
        room.object_mut(objects::DIGITAL_CLOCK_TEXT)?
            .set_text(reading.display.clone());
        Ok(reading)
    }
}

/// Digital display text at `stage`: the stage as a zero-padded hour.
#[must_use]
pub fn display_for(stage: StageIndex) -> String {
    format!("{:02}:00", stage.get())
}
