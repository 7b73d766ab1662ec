//! Hard anomaly families built around the laptop device.

use std::fmt;

use log::debug;
use lucid_core::{
    objects, AnomalyCode, ConfigurationError, ContentError, HardFamily, HazardParameters, RoomId,
};
use lucid_room::Room;

use crate::{Laptop, VariantPicker};

/// Family-specific staging performed before the laptop is switched on.
pub trait HazardStage: fmt::Debug + Send {
    /// Family the staging belongs to.
    fn family(&self) -> HardFamily;

    /// Prepares the room for the hazard.
    fn stage(&self, room: &mut Room) -> Result<(), ContentError>;
}

/// Laptop wakes up on the desk with a boot prompt.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaptopTerminal;

impl HazardStage for LaptopTerminal {
    fn family(&self) -> HardFamily {
        HardFamily::LaptopTerminal
    }

    fn stage(&self, room: &mut Room) -> Result<(), ContentError> {
        room.object_mut(objects::LAPTOP)?.set_text("BOOTING...");
        Ok(())
    }
}

/// Bedroom door disappears until the laptop puzzle is solved.
#[derive(Clone, Copy, Debug, Default)]
pub struct SealedDoor;

impl HazardStage for SealedDoor {
    fn family(&self) -> HardFamily {
        HardFamily::SealedDoor
    }

    fn stage(&self, room: &mut Room) -> Result<(), ContentError> {
        room.object_mut(objects::BEDROOM_DOOR)?.set_active(false);
        room.object_mut(objects::LAPTOP)?.set_text("ENTER CODE");
        Ok(())
    }
}

/// Hazard family that pairs a staging step with a laptop device.
///
/// Usage per room is `apply` followed by exactly one
/// `assign_variant_code`. The laptop is disarmed on every `apply`, so the
/// reported classification always refers to the most recent room.
#[derive(Debug)]
pub struct HardAnomaly {
    stage: Box<dyn HazardStage>,
    laptop: Laptop,
    applied_to: Option<RoomId>,
    assigned: bool,
}

impl HardAnomaly {
    /// Creates a family from its staging step and device.
    #[must_use]
    pub fn new(stage: impl HazardStage + 'static, laptop: Laptop) -> Self {
        Self {
            stage: Box::new(stage),
            laptop,
            applied_to: None,
            assigned: false,
        }
    }

    /// Family identifier.
    #[must_use]
    pub fn family(&self) -> HardFamily {
        self.stage.family()
    }

    /// Device configured by this family.
    #[must_use]
    pub const fn laptop(&self) -> &Laptop {
        &self.laptop
    }

    /// Room the family was last applied to.
    #[must_use]
    pub const fn applied_room(&self) -> Option<RoomId> {
        self.applied_to
    }

    /// Stages the hazard and switches the laptop on.
    ///
    /// Any state left from a previous room is cleared first, so a failed
    /// staging leaves the family unapplied.
    pub fn apply(&mut self, room: &mut Room) -> Result<(), ContentError> {
        self.laptop.disarm();
        self.applied_to = None;
        self.assigned = false;

        self.stage.stage(room)?;
        room.object_mut(objects::LAPTOP)?.set_active(true);
        self.applied_to = Some(room.id());
        debug!("staged {:?} in room {}", self.family(), room.id());
        Ok(())
    }

    /// Picks the hazard variant for the room last applied to and arms the laptop.
    pub fn assign_variant_code(
        &mut self,
        picker: &mut dyn VariantPicker,
    ) -> Result<HazardParameters, ConfigurationError> {
        let family = self.family();
        let Some(room) = self.applied_to else {
            return Err(ConfigurationError::VariantWithoutApply { family });
        };
        if self.assigned {
            return Err(ConfigurationError::VariantAlreadyAssigned { family, room });
        }

        let variant = picker.pick(family);
        let hazard = self.laptop.configure(variant);
        self.assigned = true;
        debug!("armed {family:?} in room {room} with {hazard:?}");
        Ok(hazard)
    }

    /// Classification of the family with the variant currently armed.
    #[must_use]
    pub fn classify(&self) -> AnomalyCode {
        AnomalyCode::Hard {
            family: self.family(),
            variant: self.laptop.variant(),
        }
    }
}
