#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Mutation strategies that turn an ordinary room into an anomalous one.
//!
//! Plain anomalies implement [`Anomaly`] and are stateless: they flip a named
//! object in the room and report a fixed [`AnomalyCode`]. Hard anomalies are
//! families of hazards sharing a laptop device; after staging the room they
//! need a second step, [`HardAnomaly::assign_variant_code`], that picks the
//! concrete hazard. [`MutationStrategy`] tags the two shapes so callers
//! resolve the extra step once, at selection time.

mod hard;
mod laptop;
mod picker;
mod plain;

use std::fmt;

use lucid_core::{AnomalyCode, ContentError, Tier};
use lucid_room::Room;

pub use hard::{HardAnomaly, HazardStage, LaptopTerminal, SealedDoor};
pub use laptop::{HazardTuning, Laptop};
pub use picker::{FixedPicker, SeededPicker, VariantPicker, VariantSelection};
pub use plain::{
    ClockRunsBackward, DigitalClockGlitch, DrawerMissingContent, PianoMissing, PortraitUpsideDown,
    BACKWARD_CLOCK_OFFSET_DEGREES, GLITCHED_CLOCK_TEXT,
};

/// Stateless mutation that injects a single plain anomaly.
pub trait Anomaly: fmt::Debug + Send {
    /// Mutates the room's object storage.
    fn apply(&self, room: &mut Room) -> Result<(), ContentError>;

    /// Classification identifying this anomaly.
    fn classify(&self) -> AnomalyCode;
}

/// Catalog entry, tagged by the shape of the strategy.
#[derive(Debug)]
pub enum MutationStrategy {
    /// Single-step anomaly from the easy tier.
    Plain(Box<dyn Anomaly>),
    /// Hazard family that also needs a variant assigned after applying.
    Hard(HardAnomaly),
}

impl MutationStrategy {
    /// Wraps a plain anomaly.
    #[must_use]
    pub fn plain(anomaly: impl Anomaly + 'static) -> Self {
        Self::Plain(Box::new(anomaly))
    }

    /// Wraps a hard anomaly family.
    #[must_use]
    pub fn hard(anomaly: HardAnomaly) -> Self {
        Self::Hard(anomaly)
    }

    /// Tier implied by the strategy's shape.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        match self {
            Self::Plain(_) => Tier::Easy,
            Self::Hard(_) => Tier::Hard,
        }
    }

    /// Applies the strategy to the room.
    pub fn apply(&mut self, room: &mut Room) -> Result<(), ContentError> {
        match self {
            Self::Plain(anomaly) => anomaly.apply(room),
            Self::Hard(anomaly) => anomaly.apply(room),
        }
    }

    /// Classification currently reported by the strategy.
    #[must_use]
    pub fn classify(&self) -> AnomalyCode {
        match self {
            Self::Plain(anomaly) => anomaly.classify(),
            Self::Hard(anomaly) => anomaly.classify(),
        }
    }

    /// Hard family behind this entry, if it is one.
    pub fn as_hard_mut(&mut self) -> Option<&mut HardAnomaly> {
        match self {
            Self::Plain(_) => None,
            Self::Hard(anomaly) => Some(anomaly),
        }
    }
}
