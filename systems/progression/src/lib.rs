#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Caller-side run progression: which stage comes next, whether its room
//! should carry an anomaly, and how the player's verdict moves the run.
//!
//! The generator never decides stages on its own. A host asks
//! [`Progression::next_request`] for the next room, generates it, lets the
//! player inspect it and reports the verdict through [`Progression::resolve`].

use log::{debug, info};
use lucid_core::{derive_labeled_seed, AnomalyCode, StageIndex, RNG_STREAM_PROGRESSION};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stage at which a run ends by default.
pub const DEFAULT_FINAL_STAGE: u32 = 10;

/// Probability that a non-tutorial room carries an anomaly by default.
pub const DEFAULT_ANOMALY_CHANCE: f64 = 0.5;

/// Tunable parameters of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Probability in `[0, 1]` that a room after the tutorial is anomalous.
    pub anomaly_chance: f64,
    /// Stage whose arrival ends the run.
    pub final_stage: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            anomaly_chance: DEFAULT_ANOMALY_CHANCE,
            final_stage: DEFAULT_FINAL_STAGE,
        }
    }
}

/// Rejected progression parameters.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ProgressionError {
    /// The anomaly chance is not a probability.
    #[error("anomaly chance {chance} is outside [0, 1]")]
    InvalidAnomalyChance {
        /// Offending value.
        chance: f64,
    },
    /// The run would end before the first playable stage.
    #[error("final stage must be at least 1")]
    FinalStageTooSmall,
}

/// Room the host should generate next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoomRequest {
    /// Stage of the room.
    pub stage: StageIndex,
    /// Whether the room should carry an anomaly.
    pub have_anomaly: bool,
}

/// Player's judgement of the room they inspected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Nothing looked wrong; keep sleeping.
    Sleep,
    /// Something was off; wake up.
    WakeUp,
}

impl Verdict {
    /// Verdict that is correct for a room classified as `code`.
    #[must_use]
    pub const fn expected_for(code: AnomalyCode) -> Self {
        if code.is_anomaly() {
            Self::WakeUp
        } else {
            Self::Sleep
        }
    }
}

/// Effect of a verdict on the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Correct verdict, the run moves to `stage`.
    Advanced {
        /// Stage of the next room.
        stage: StageIndex,
    },
    /// Wrong verdict, the run falls back to `stage`.
    Reset {
        /// Stage of the next room.
        stage: StageIndex,
    },
    /// The final stage was reached; the run is over.
    Escaped {
        /// Stage that ended the run.
        stage: StageIndex,
    },
}

impl Outcome {
    /// Reports whether the run has ended.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Escaped { .. })
    }
}

/// Seeded stage and anomaly scheduler for one run.
#[derive(Clone, Debug)]
pub struct Progression {
    stage: StageIndex,
    final_stage: StageIndex,
    anomaly_chance: f64,
    rng: ChaCha8Rng,
    escaped: bool,
}

impl Progression {
    /// Starts a run at the tutorial stage.
    pub fn new(config: ProgressionConfig, seed: u64) -> Result<Self, ProgressionError> {
        if !(0.0..=1.0).contains(&config.anomaly_chance) {
            return Err(ProgressionError::InvalidAnomalyChance {
                chance: config.anomaly_chance,
            });
        }
        if config.final_stage == 0 {
            return Err(ProgressionError::FinalStageTooSmall);
        }

        Ok(Self {
            stage: StageIndex::TUTORIAL,
            final_stage: StageIndex::new(config.final_stage),
            anomaly_chance: config.anomaly_chance,
            rng: ChaCha8Rng::seed_from_u64(derive_labeled_seed(seed, RNG_STREAM_PROGRESSION)),
            escaped: false,
        })
    }

    /// Draws the next room request.
    ///
    /// The tutorial stage is always anomaly-free.
    pub fn next_request(&mut self) -> RoomRequest {
        let have_anomaly = !self.stage.is_tutorial() && self.rng.gen_bool(self.anomaly_chance);
        RoomRequest {
            stage: self.stage,
            have_anomaly,
        }
    }

    /// Applies the player's verdict on a room classified as `code`.
    pub fn resolve(&mut self, verdict: Verdict, code: AnomalyCode) -> Outcome {
        if self.escaped {
            return Outcome::Escaped { stage: self.stage };
        }

        if verdict != Verdict::expected_for(code) {
            debug!("wrong verdict {verdict:?} at stage {}", self.stage);
            self.stage = StageIndex::new(1);
            return Outcome::Reset { stage: self.stage };
        }

        self.stage = self.stage.next();
        if self.stage.get() >= self.final_stage.get() {
            self.escaped = true;
            info!("run escaped at stage {}", self.stage);
            return Outcome::Escaped { stage: self.stage };
        }
        Outcome::Advanced { stage: self.stage }
    }

    /// Stage of the next room.
    #[must_use]
    pub const fn stage(&self) -> StageIndex {
        self.stage
    }

    /// Stage that ends the run.
    #[must_use]
    pub const fn final_stage(&self) -> StageIndex {
        self.final_stage
    }

    /// Reports whether the run has ended.
    #[must_use]
    pub const fn is_escaped(&self) -> bool {
        self.escaped
    }
}
