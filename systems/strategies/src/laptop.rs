//! Laptop device that hosts hard hazard puzzles.

use std::time::Duration;

use lucid_core::{
    HardAnomalyCode, HazardParameters, DEFAULT_FRUIT_COUNT, DEFAULT_LAVA_RISE_PER_SECOND,
    DEFAULT_TIME_BOMB_FUSE,
};
use serde::{Deserialize, Serialize};

/// Parameters pushed to the laptop for each hazard variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    /// Rise rate of the lava surface, in room heights per second.
    pub lava_rise_per_second: f32,
    /// Countdown armed by the time bomb, in whole seconds.
    pub time_bomb_fuse_secs: u64,
    /// Number of fruits released by the fruit drop.
    pub fruit_count: u32,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            lava_rise_per_second: DEFAULT_LAVA_RISE_PER_SECOND,
            time_bomb_fuse_secs: DEFAULT_TIME_BOMB_FUSE.as_secs(),
            fruit_count: DEFAULT_FRUIT_COUNT,
        }
    }
}

impl HazardTuning {
    /// Device parameters implied by `variant`.
    #[must_use]
    pub fn parameters(&self, variant: HardAnomalyCode) -> HazardParameters {
        match variant {
            HardAnomalyCode::Lava => HazardParameters::Lava {
                rise_per_second: self.lava_rise_per_second,
            },
            HardAnomalyCode::TimeBomb => HazardParameters::TimeBomb {
                fuse: Duration::from_secs(self.time_bomb_fuse_secs),
            },
            HardAnomalyCode::FruitDrop => HazardParameters::FruitDrop {
                fruit_count: self.fruit_count,
            },
        }
    }
}

/// Sub-puzzle device owned by a hard anomaly family.
#[derive(Clone, Debug, PartialEq)]
pub struct Laptop {
    tuning: HazardTuning,
    armed: Option<HazardParameters>,
}

impl Laptop {
    /// Creates a disarmed laptop.
    #[must_use]
    pub const fn new(tuning: HazardTuning) -> Self {
        Self {
            tuning,
            armed: None,
        }
    }

    /// Arms the laptop for `variant`, replacing any earlier configuration.
    pub fn configure(&mut self, variant: HardAnomalyCode) -> HazardParameters {
        let parameters = self.tuning.parameters(variant);
        self.armed = Some(parameters);
        parameters
    }

    /// Clears the current configuration.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Hazard the laptop is armed with.
    #[must_use]
    pub const fn hazard(&self) -> Option<HazardParameters> {
        self.armed
    }

    /// Variant the laptop is armed with.
    #[must_use]
    pub fn variant(&self) -> Option<HardAnomalyCode> {
        self.armed.as_ref().map(HazardParameters::variant)
    }

    /// Tuning applied when arming.
    #[must_use]
    pub const fn tuning(&self) -> &HazardTuning {
        &self.tuning
    }
}
