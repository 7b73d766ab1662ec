//! Policies that decide which hazard variant a hard family arms.

use std::fmt;

use lucid_core::{HardAnomalyCode, HardFamily};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of hazard variants for hard anomaly families.
pub trait VariantPicker: fmt::Debug + Send {
    /// Chooses the variant `family` arms in the current room.
    fn pick(&mut self, family: HardFamily) -> HardAnomalyCode;
}

/// Uniformly random variants from a reproducible ChaCha stream.
#[derive(Clone, Debug)]
pub struct SeededPicker {
    rng: ChaCha8Rng,
}

impl SeededPicker {
    /// Creates a picker seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl VariantPicker for SeededPicker {
    fn pick(&mut self, _family: HardFamily) -> HardAnomalyCode {
        let index = self.rng.gen_range(0..HardAnomalyCode::ALL.len());
        HardAnomalyCode::ALL[index]
    }
}

/// Always arms the same variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPicker {
    variant: HardAnomalyCode,
}

impl FixedPicker {
    /// Creates a picker that always answers `variant`.
    #[must_use]
    pub const fn new(variant: HardAnomalyCode) -> Self {
        Self { variant }
    }
}

impl VariantPicker for FixedPicker {
    fn pick(&mut self, _family: HardFamily) -> HardAnomalyCode {
        self.variant
    }
}

/// Configuration-level choice of variant picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum VariantSelection {
    /// Uniform random selection from a seeded stream.
    Seeded {
        /// Seed of the stream.
        seed: u64,
    },
    /// Deterministic selection of a single variant.
    Fixed {
        /// Variant armed every time.
        variant: HardAnomalyCode,
    },
}

impl VariantSelection {
    /// Builds the picker described by this selection.
    #[must_use]
    pub fn into_picker(self) -> Box<dyn VariantPicker> {
        match self {
            Self::Seeded { seed } => Box::new(SeededPicker::new(seed)),
            Self::Fixed { variant } => Box::new(FixedPicker::new(variant)),
        }
    }
}
