#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that wires the Lucid engine together.
//!
//! The catalog is populated from an explicit registration list so the
//! authoring order, and therefore the order a run sees anomalies in, is
//! visible in one place.

use log::debug;
use lucid_core::{
    derive_labeled_seed, objects, ExhaustionPolicy, TestMode, Tier, RNG_STREAM_VARIANTS,
    WELCOME_BANNER,
};
use lucid_room::{RoomContainer, RoomObject, RoomTemplate};
use lucid_system_catalog::MutationCatalog;
use lucid_system_clock_sync::{ClockConfig, ClockSync};
use lucid_system_generation::Generator;
use lucid_system_progression::{Progression, ProgressionConfig, ProgressionError};
use lucid_system_strategies::{
    ClockRunsBackward, DigitalClockGlitch, DrawerMissingContent, HardAnomaly, HazardTuning, Laptop,
    LaptopTerminal, MutationStrategy, PianoMissing, PortraitUpsideDown, SealedDoor,
    VariantSelection,
};
use serde::{Deserialize, Serialize};

/// Name of the canonical room template.
pub const DEFAULT_TEMPLATE_NAME: &str = "bedroom";

/// Everything a host can tune about the engine, loadable from a config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base seed of the run; sub-streams are derived from it.
    pub seed: u64,
    /// Behaviour when a tier runs out of unseen anomalies.
    pub exhaustion: ExhaustionPolicy,
    /// Playtesting override pinning a single catalog entry.
    pub test_mode: TestMode,
    /// Hard variant picker; derived from `seed` when absent.
    pub variants: Option<VariantSelection>,
    /// Clock display tuning.
    pub clock: ClockConfig,
    /// Laptop hazard tuning.
    pub hazards: HazardTuning,
    /// Run length and anomaly frequency.
    pub progression: ProgressionConfig,
}

impl EngineConfig {
    /// Picker configuration in effect for this config.
    #[must_use]
    pub fn variant_selection(&self) -> VariantSelection {
        self.variants.unwrap_or(VariantSelection::Seeded {
            seed: derive_labeled_seed(self.seed, RNG_STREAM_VARIANTS),
        })
    }
}

/// Produces the data and collaborators required to start a run.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Banner shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        WELCOME_BANNER
    }

    /// Builds a generator and a run scheduler from `config`.
    pub fn start(
        &self,
        config: &EngineConfig,
    ) -> Result<(Generator, Progression), ProgressionError> {
        let progression = Progression::new(config.progression, config.seed)?;
        Ok((self.generator(config), progression))
    }

    /// Builds the generation orchestrator described by `config`.
    #[must_use]
    pub fn generator(&self, config: &EngineConfig) -> Generator {
        let catalog = default_catalog(config.exhaustion, config.hazards)
            .with_test_mode(config.test_mode);
        debug!(
            "bootstrapped catalog with {} easy and {} hard entries",
            catalog.len(Tier::Easy),
            catalog.len(Tier::Hard)
        );

        Generator::new(
            catalog,
            RoomContainer::new(default_template()),
            ClockSync::new(config.clock),
            config.variant_selection().into_picker(),
        )
    }
}

/// Canonical bedroom with every object the registered strategies touch.
#[must_use]
pub fn default_template() -> RoomTemplate {
    RoomTemplate::new(DEFAULT_TEMPLATE_NAME)
        .with_object(objects::CLOCK_HOUR_HAND, RoomObject::visible())
        .with_object(objects::DIGITAL_CLOCK_TEXT, RoomObject::with_text("00:00"))
        .with_object(objects::DRAWER_MISSING_CONTENT, RoomObject::visible())
        .with_object(objects::TUTORIAL_IMAGE, RoomObject::hidden())
        .with_object(objects::PIANO, RoomObject::visible())
        .with_object(objects::PORTRAIT, RoomObject::visible())
        .with_object(objects::LAPTOP, RoomObject::hidden())
        .with_object(objects::BEDROOM_DOOR, RoomObject::visible())
}

/// Catalog holding every anomaly in authoring order.
#[must_use]
pub fn default_catalog(policy: ExhaustionPolicy, hazards: HazardTuning) -> MutationCatalog {
    let mut catalog = MutationCatalog::new(policy);

    let easy = [
        MutationStrategy::plain(DrawerMissingContent),
        MutationStrategy::plain(PianoMissing),
        MutationStrategy::plain(ClockRunsBackward),
        MutationStrategy::plain(DigitalClockGlitch),
        MutationStrategy::plain(PortraitUpsideDown),
    ];
    let hard = [
        MutationStrategy::hard(HardAnomaly::new(LaptopTerminal, Laptop::new(hazards))),
        MutationStrategy::hard(HardAnomaly::new(SealedDoor, Laptop::new(hazards))),
    ];

    for strategy in easy.into_iter().chain(hard) {
        let _ = catalog.register(strategy);
    }
    catalog
}
