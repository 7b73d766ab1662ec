//! Plain anomalies offered by the easy tier.

use lucid_core::{objects, AnomalyCode, ContentError};
use lucid_room::Room;

use crate::Anomaly;

/// Degrees the hour hand is wound back by [`ClockRunsBackward`].
pub const BACKWARD_CLOCK_OFFSET_DEGREES: f32 = 60.0;

/// Text shown by the digital clock under [`DigitalClockGlitch`].
pub const GLITCHED_CLOCK_TEXT: &str = "44:44";

/// Empties the desk drawer.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawerMissingContent;

impl Anomaly for DrawerMissingContent {
    fn apply(&self, room: &mut Room) -> Result<(), ContentError> {
        room.object_mut(objects::DRAWER_MISSING_CONTENT)?
            .set_active(false);
        Ok(())
    }

    fn classify(&self) -> AnomalyCode {
        AnomalyCode::DrawerMissingContent
    }
}

/// Removes the piano from the corner.
#[derive(Clone, Copy, Debug, Default)]
pub struct PianoMissing;

impl Anomaly for PianoMissing {
    fn apply(&self, room: &mut Room) -> Result<(), ContentError> {
        room.object_mut(objects::PIANO)?.set_active(false);
        Ok(())
    }

    fn classify(&self) -> AnomalyCode {
        AnomalyCode::PianoMissing
    }
}

/// Winds the analog hour hand back so it disagrees with the digital clock.
///
/// Relies on the clock already being synced for the stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockRunsBackward;

impl Anomaly for ClockRunsBackward {
    fn apply(&self, room: &mut Room) -> Result<(), ContentError> {
        let hand = room.object_mut(objects::CLOCK_HOUR_HAND)?;
        let rotation = hand.rotation_degrees() - BACKWARD_CLOCK_OFFSET_DEGREES;
        hand.set_rotation_degrees(rotation);
        Ok(())
    }

    fn classify(&self) -> AnomalyCode {
        AnomalyCode::ClockRunsBackward
    }
}

/// Shows an impossible time on the digital clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct DigitalClockGlitch;

impl Anomaly for DigitalClockGlitch {
    fn apply(&self, room: &mut Room) -> Result<(), ContentError> {
        room.object_mut(objects::DIGITAL_CLOCK_TEXT)?
            .set_text(GLITCHED_CLOCK_TEXT);
        Ok(())
    }

    fn classify(&self) -> AnomalyCode {
        AnomalyCode::DigitalClockGlitch
    }
}

/// Hangs the portrait upside down.
#[derive(Clone, Copy, Debug, Default)]
pub struct PortraitUpsideDown;

impl Anomaly for PortraitUpsideDown {
    fn apply(&self, room: &mut Room) -> Result<(), ContentError> {
        let portrait = room.object_mut(objects::PORTRAIT)?;
        let rotation = (portrait.rotation_degrees() + 180.0) % 360.0;
        portrait.set_rotation_degrees(rotation);
        Ok(())
    }

    fn classify(&self) -> AnomalyCode {
        AnomalyCode::PortraitUpsideDown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucid_core::RoomId;
    use lucid_room::{RoomObject, RoomTemplate, RoomTransform};

    fn furnished() -> Room {
        let mut hand = RoomObject::visible();
        hand.set_rotation_degrees(90.0);
        RoomTemplate::new("furnished")
            .with_object(objects::DRAWER_MISSING_CONTENT, RoomObject::visible())
            .with_object(objects::PIANO, RoomObject::visible())
            .with_object(objects::CLOCK_HOUR_HAND, hand)
            .with_object(objects::DIGITAL_CLOCK_TEXT, RoomObject::with_text("03:00"))
            .with_object(objects::PORTRAIT, RoomObject::visible())
            .instantiate(RoomId::new(2), "rooms", RoomTransform::IDENTITY)
    }

    #[test]
    fn drawer_anomaly_hides_drawer_content() {
        let mut room = furnished();
        DrawerMissingContent.apply(&mut room).expect("drawer");
        let drawer = room
            .object(objects::DRAWER_MISSING_CONTENT)
            .expect("drawer");
        assert!(!drawer.is_active());
    }

    #[test]
    fn backward_clock_winds_hand_back() {
        let mut room = furnished();
        ClockRunsBackward.apply(&mut room).expect("clock");
        let hand = room.object(objects::CLOCK_HOUR_HAND).expect("clock");
        assert!((hand.rotation_degrees() - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn glitch_overwrites_digital_display() {
        let mut room = furnished();
        DigitalClockGlitch.apply(&mut room).expect("display");
        let display = room.object(objects::DIGITAL_CLOCK_TEXT).expect("display");
        assert_eq!(display.text(), Some(GLITCHED_CLOCK_TEXT));
    }

    #[test]
    fn portrait_flips_half_a_turn() {
        let mut room = furnished();
        PortraitUpsideDown.apply(&mut room).expect("portrait");
        PortraitUpsideDown.apply(&mut room).expect("portrait");
        let portrait = room.object(objects::PORTRAIT).expect("portrait");
        assert!(portrait.rotation_degrees().abs() < f32::EPSILON);
    }

    #[test]
    fn missing_object_fails_loudly() {
        let mut room = RoomTemplate::new("bare").instantiate(
            RoomId::new(5),
            "rooms",
            RoomTransform::IDENTITY,
        );
        assert_eq!(
            PianoMissing.apply(&mut room),
            Err(ContentError::MissingObject {
                room: RoomId::new(5),
                name: objects::PIANO,
            })
        );
    }
}
