#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Generation orchestrator answering "build the next room for this stage".
//!
//! Each call to [`Generator::generate_room`] is one complete transaction:
//! tear down the previous room, build a fresh one, sync its clocks, and,
//! when requested, draw a strategy from the catalog and apply it. Cursors
//! live in the catalog and the current room lives in the container.

use log::{debug, info};
use lucid_core::{
    objects, AnomalyCode, CatalogError, Event, ExhaustionPolicy, GenerationError, StageIndex,
};
use lucid_room::{Room, RoomContainer};
use lucid_system_catalog::MutationCatalog;
use lucid_system_clock_sync::ClockSync;
use lucid_system_strategies::VariantPicker;

/// Composes catalog, room container, clock sync and variant picker.
#[derive(Debug)]
pub struct Generator {
    catalog: MutationCatalog,
    rooms: RoomContainer,
    clock: ClockSync,
    picker: Box<dyn VariantPicker>,
}

impl Generator {
    /// Creates an orchestrator from its collaborators.
    #[must_use]
    pub fn new(
        catalog: MutationCatalog,
        rooms: RoomContainer,
        clock: ClockSync,
        picker: Box<dyn VariantPicker>,
    ) -> Self {
        Self {
            catalog,
            rooms,
            clock,
            picker,
        }
    }

    /// Builds the room for `stage`, injecting an anomaly when requested.
    ///
    /// Signals for presentation collaborators are appended to `out_events`
    /// in the order the steps happened. On error the freshly built room stays
    /// current and the events emitted so far remain in the buffer.
    ///
    /// The catalog cursor advances when the strategy is selected, before it
    /// is applied. A strategy whose application fails with a content error
    /// has still used up its catalog entry.
    pub fn generate_room(
        &mut self,
        have_anomaly: bool,
        stage: StageIndex,
        out_events: &mut Vec<Event>,
    ) -> Result<AnomalyCode, GenerationError> {
        if let Some(room) = self.rooms.cleanup_current() {
            out_events.push(Event::RoomDestroyed { room });
        }

        let room = self.rooms.create_room();
        let room_id = room.id();
        out_events.push(Event::RoomCreated { room: room_id });

        let reading = self.clock.set_clock(room, stage)?;
        out_events.push(Event::ClockSynced {
            room: room_id,
            stage,
            rotation_degrees: reading.rotation_degrees,
            display: reading.display,
        });

        if !have_anomaly {
            if stage.is_tutorial() {
                show_tutorial(room)?;
                out_events.push(Event::TutorialShown { room: room_id });
            }
            info!("room {room_id} for stage {stage} generated without anomaly");
            return Ok(AnomalyCode::NoAnomaly);
        }

        let tier = self
            .catalog
            .test_mode()
            .forced_tier()
            .unwrap_or_else(|| stage.tier());
        let policy = self.catalog.policy();

        let selection = match self.catalog.select(tier) {
            Ok(selection) => selection,
            Err(CatalogError::Exhausted { tier, .. })
                if policy == ExhaustionPolicy::StopOffering =>
            {
                info!("{tier} tier exhausted, room {room_id} generated without anomaly");
                out_events.push(Event::AnomalyWithheld {
                    room: room_id,
                    tier,
                });
                return Ok(AnomalyCode::NoAnomaly);
            }
            Err(error) => return Err(error.into()),
        };

        if selection.wrapped() && selection.position == 0 {
            out_events.push(Event::CatalogWrapped {
                tier: selection.tier,
                lap: selection.lap,
            });
        }

        selection.strategy.apply(room)?;
        if let Some(hard) = selection.strategy.as_hard_mut() {
            let hazard = hard.assign_variant_code(self.picker.as_mut())?;
            out_events.push(Event::HazardArmed {
                room: room_id,
                family: hard.family(),
                hazard,
            });
        }

        let code = selection.strategy.classify();
        debug!(
            "applied {} entry {} to room {room_id}",
            selection.tier, selection.position
        );
        out_events.push(Event::AnomalyInjected {
            room: room_id,
            tier: selection.tier,
            position: selection.position,
            code,
        });
        info!("room {room_id} for stage {stage} generated with {code:?}");
        Ok(code)
    }

    /// Catalog the orchestrator draws from.
    #[must_use]
    pub const fn catalog(&self) -> &MutationCatalog {
        &self.catalog
    }

    /// Mutable access to the catalog, e.g. to toggle test mode between calls.
    pub fn catalog_mut(&mut self) -> &mut MutationCatalog {
        &mut self.catalog
    }

    /// Container owning the current room.
    #[must_use]
    pub const fn rooms(&self) -> &RoomContainer {
        &self.rooms
    }

    /// Room built by the most recent call, if any.
    #[must_use]
    pub fn current_room(&self) -> Option<&Room> {
        self.rooms.current()
    }

    /// Tears down the current room without building a new one.
    pub fn cleanup(&mut self, out_events: &mut Vec<Event>) {
        if let Some(room) = self.rooms.cleanup_current() {
            out_events.push(Event::RoomDestroyed { room });
        }
    }
}

fn show_tutorial(room: &mut Room) -> Result<(), GenerationError> {
    room.object_mut(objects::TUTORIAL_IMAGE)?.set_active(true);
    Ok(())
}
