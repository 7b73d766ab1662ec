#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lucid anomaly engine.
//!
//! This crate defines the vocabulary that connects the room storage, the
//! mutation strategies, the catalog and the generation orchestrator. Callers
//! request rooms by [`StageIndex`], the orchestrator answers with an
//! [`AnomalyCode`], and every step of the transaction is broadcast as an
//! [`Event`] so that presentation collaborators can react without the engine
//! ever waiting on them.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lucid. Something in this room is not right.";

/// First stage index that draws from the hard tier.
pub const HARD_TIER_FIRST_STAGE: u32 = 5;

/// Fuse length armed by the time bomb hazard unless configured otherwise.
pub const DEFAULT_TIME_BOMB_FUSE: Duration = Duration::from_secs(60);

/// Rate at which the lava hazard rises unless configured otherwise.
pub const DEFAULT_LAVA_RISE_PER_SECOND: f32 = 0.05;

/// Number of fruits released by the fruit drop hazard unless configured otherwise.
pub const DEFAULT_FRUIT_COUNT: u32 = 12;

/// Label of the random stream that picks hard anomaly variants.
pub const RNG_STREAM_VARIANTS: &str = "variants";

/// Label of the random stream that decides which rooms carry anomalies.
pub const RNG_STREAM_PROGRESSION: &str = "progression";

/// Derives an independent seed for the stream identified by `label`.
#[must_use]
pub fn derive_labeled_seed(base: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Stage requested by the caller for a single generation call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StageIndex(u32);

impl StageIndex {
    /// Stage presented before any anomaly can appear.
    pub const TUTORIAL: Self = Self(0);

    /// Creates a new stage index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric stage.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Difficulty tier the stage draws anomalies from.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        if self.0 < HARD_TIER_FIRST_STAGE {
            Tier::Easy
        } else {
            Tier::Hard
        }
    }

    /// Reports whether this is the tutorial stage.
    #[must_use]
    pub const fn is_tutorial(&self) -> bool {
        self.0 == 0
    }

    /// Stage that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for StageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty class governing which anomaly sequence is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Plain anomalies offered during the opening stages.
    Easy,
    /// Hazard families offered once the player has settled in.
    Hard,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => f.write_str("easy"),
            Self::Hard => f.write_str("hard"),
        }
    }
}

/// Sub-variant selected for a hard anomaly after it has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HardAnomalyCode {
    /// Floor slowly floods with lava.
    Lava,
    /// A countdown starts on the laptop.
    TimeBomb,
    /// Fruit rains from the ceiling.
    FruitDrop,
}

impl HardAnomalyCode {
    /// Every variant in declaration order.
    pub const ALL: [Self; 3] = [Self::Lava, Self::TimeBomb, Self::FruitDrop];
}

/// Hard anomaly families registered with the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HardFamily {
    /// The laptop on the desk wakes up and hosts the hazard puzzle.
    LaptopTerminal,
    /// The bedroom door is sealed until the laptop puzzle is solved.
    SealedDoor,
}

/// Classification reported for every generated room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnomalyCode {
    /// The room is exactly as it should be.
    NoAnomaly,
    /// The drawer that normally holds a keepsake is empty.
    DrawerMissingContent,
    /// The piano has vanished.
    PianoMissing,
    /// The analog clock turns the wrong way.
    ClockRunsBackward,
    /// The digital clock shows an impossible time.
    DigitalClockGlitch,
    /// The portrait hangs upside down.
    PortraitUpsideDown,
    /// A hard hazard family, with the variant once it has been assigned.
    Hard {
        /// Family that produced the hazard.
        family: HardFamily,
        /// Variant chosen for the current room, `None` before assignment.
        variant: Option<HardAnomalyCode>,
    },
}

impl AnomalyCode {
    /// Reports whether the code describes an injected anomaly.
    #[must_use]
    pub const fn is_anomaly(&self) -> bool {
        !matches!(self, Self::NoAnomaly)
    }

    /// Tier the code belongs to, `None` for anomaly-free rooms.
    #[must_use]
    pub const fn tier(&self) -> Option<Tier> {
        match self {
            Self::NoAnomaly => None,
            Self::Hard { .. } => Some(Tier::Hard),
            _ => Some(Tier::Easy),
        }
    }

    /// Variant assigned to a hard anomaly, if any.
    #[must_use]
    pub const fn hard_variant(&self) -> Option<HardAnomalyCode> {
        match self {
            Self::Hard { variant, .. } => *variant,
            _ => None,
        }
    }
}

/// Device configuration implied by a hard anomaly variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HazardParameters {
    /// Lava rising at a constant rate, in room heights per second.
    Lava {
        /// Rise rate of the lava surface.
        rise_per_second: f32,
    },
    /// Countdown shown on the laptop.
    TimeBomb {
        /// Time until detonation.
        fuse: Duration,
    },
    /// Fruit released from the ceiling.
    FruitDrop {
        /// Number of fruits dropped.
        fruit_count: u32,
    },
}

impl HazardParameters {
    /// Variant these parameters configure.
    #[must_use]
    pub const fn variant(&self) -> HardAnomalyCode {
        match self {
            Self::Lava { .. } => HardAnomalyCode::Lava,
            Self::TimeBomb { .. } => HardAnomalyCode::TimeBomb,
            Self::FruitDrop { .. } => HardAnomalyCode::FruitDrop,
        }
    }
}

/// Unique identifier assigned to a room instance by its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(u32);

impl RoomId {
    /// Creates a new room identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Symbolic name of a mutable sub-object stored inside a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectName(&'static str);

impl ObjectName {
    /// Wraps a static object name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Name as authored in the room template.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Canonical object names every room template is expected to provide.
pub mod objects {
    use super::ObjectName;

    /// Hour hand of the analog wall clock.
    pub const CLOCK_HOUR_HAND: ObjectName = ObjectName::new("clockHourHand");
    /// Text display of the bedside digital clock.
    pub const DIGITAL_CLOCK_TEXT: ObjectName = ObjectName::new("digitalClockText");
    /// Keepsake resting inside the desk drawer.
    pub const DRAWER_MISSING_CONTENT: ObjectName = ObjectName::new("drawerMissingContent");
    /// Banner shown in the tutorial room.
    pub const TUTORIAL_IMAGE: ObjectName = ObjectName::new("tutorialImage");
    /// Upright piano in the corner.
    pub const PIANO: ObjectName = ObjectName::new("piano");
    /// Framed portrait above the bed.
    pub const PORTRAIT: ObjectName = ObjectName::new("portrait");
    /// Laptop that hosts hard hazard puzzles.
    pub const LAPTOP: ObjectName = ObjectName::new("laptop");
    /// Door leading out of the bedroom.
    pub const BEDROOM_DOOR: ObjectName = ObjectName::new("bedroomDoor");
}

/// Policy applied when a tier runs out of unseen anomalies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExhaustionPolicy {
    /// Report exhaustion to the caller, which treats it as the end of the run.
    #[default]
    EndRun,
    /// Start the tier over from its first entry and keep playing.
    Wrap,
    /// Stop offering anomalies; affected rooms are generated anomaly-free.
    StopOffering,
}

/// Override that pins catalog selection to a single entry for playtesting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestMode {
    /// Enables the override.
    pub enabled: bool,
    /// Position of the pinned entry within its tier.
    pub anomaly_index: usize,
    /// Pins the hard tier instead of the easy tier.
    pub hard: bool,
}

impl TestMode {
    /// Test mode switched off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            anomaly_index: 0,
            hard: false,
        }
    }

    /// Pins selection to the easy entry at `anomaly_index`.
    #[must_use]
    pub const fn easy(anomaly_index: usize) -> Self {
        Self {
            enabled: true,
            anomaly_index,
            hard: false,
        }
    }

    /// Pins selection to the hard entry at `anomaly_index`.
    #[must_use]
    pub const fn hard(anomaly_index: usize) -> Self {
        Self {
            enabled: true,
            anomaly_index,
            hard: true,
        }
    }

    /// Tier forced by the override, `None` when disabled.
    #[must_use]
    pub const fn forced_tier(&self) -> Option<Tier> {
        match (self.enabled, self.hard) {
            (false, _) => None,
            (true, true) => Some(Tier::Hard),
            (true, false) => Some(Tier::Easy),
        }
    }
}

/// Fire-and-forget signals broadcast while a room is generated.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The previous room instance was torn down.
    RoomDestroyed {
        /// Identifier of the destroyed room.
        room: RoomId,
    },
    /// A fresh room instance became current.
    RoomCreated {
        /// Identifier of the new room.
        room: RoomId,
    },
    /// The room clocks were set for the requested stage.
    ClockSynced {
        /// Room whose clocks were updated.
        room: RoomId,
        /// Stage the clocks reflect.
        stage: StageIndex,
        /// Rotation applied to the analog hour hand.
        rotation_degrees: f32,
        /// Text written to the digital display.
        display: String,
    },
    /// The tutorial banner was revealed.
    TutorialShown {
        /// Room that shows the banner.
        room: RoomId,
    },
    /// An anomaly was applied to the room.
    AnomalyInjected {
        /// Room that received the anomaly.
        room: RoomId,
        /// Tier the anomaly was drawn from.
        tier: Tier,
        /// Position of the strategy within its tier.
        position: usize,
        /// Classification reported to the caller.
        code: AnomalyCode,
    },
    /// A hard hazard device was configured.
    HazardArmed {
        /// Room hosting the hazard.
        room: RoomId,
        /// Family that armed the hazard.
        family: HardFamily,
        /// Parameters pushed to the device.
        hazard: HazardParameters,
    },
    /// A tier ran out and selection started over.
    CatalogWrapped {
        /// Tier that wrapped.
        tier: Tier,
        /// Number of completed passes over the tier.
        lap: usize,
    },
    /// An anomaly was requested but the tier no longer offers any.
    AnomalyWithheld {
        /// Room generated without the requested anomaly.
        room: RoomId,
        /// Tier that was exhausted.
        tier: Tier,
    },
}

/// Authoring errors detected while mutating a room.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The room template does not provide a required object.
    #[error("room {room} is missing required object `{name}`")]
    MissingObject {
        /// Room that was inspected.
        room: RoomId,
        /// Object that could not be found.
        name: ObjectName,
    },
}

/// Errors caused by inconsistent engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Test mode points past the end of its tier.
    #[error("test anomaly index {index} is out of range for the {tier} tier ({len} entries)")]
    TestIndexOutOfRange {
        /// Tier pinned by test mode.
        tier: Tier,
        /// Requested position.
        index: usize,
        /// Number of registered entries.
        len: usize,
    },
    /// A tier was requested but nothing was registered for it.
    #[error("the {tier} tier has no registered anomalies")]
    EmptyTier {
        /// Tier without entries.
        tier: Tier,
    },
    /// A hard variant was assigned before the family was applied to a room.
    #[error("variant assignment for {family:?} requires a preceding apply")]
    VariantWithoutApply {
        /// Family asked to assign a variant.
        family: HardFamily,
    },
    /// A hard variant was assigned twice for the same room.
    #[error("variant for {family:?} was already assigned in room {room}")]
    VariantAlreadyAssigned {
        /// Family asked to assign a variant.
        family: HardFamily,
        /// Room the family was applied to.
        room: RoomId,
    },
}

/// Errors reported by catalog selection.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Every entry of the tier has already been offered.
    #[error("the {tier} tier is exhausted after {len} selections")]
    Exhausted {
        /// Tier that ran out.
        tier: Tier,
        /// Number of entries registered for the tier.
        len: usize,
    },
    /// The catalog configuration cannot satisfy the request.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Errors reported by a generation request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The room template is missing content a step requires.
    #[error(transparent)]
    Content(#[from] ContentError),
    /// The tier has no anomalies left and the run must end.
    #[error("anomaly catalog exhausted: the {tier} tier offered all {len} entries")]
    CatalogExhausted {
        /// Tier that ran out.
        tier: Tier,
        /// Number of entries registered for the tier.
        len: usize,
    },
    /// The engine configuration cannot satisfy the request.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl From<CatalogError> for GenerationError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::Exhausted { tier, len } => Self::CatalogExhausted { tier, len },
            CatalogError::Configuration(error) => Self::Configuration(error),
        }
    }
}
