#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Room instances and the object storage that anomalies mutate.
//!
//! A [`Room`] is built from a [`RoomTemplate`] and exposes its mutable
//! sub-objects through a name lookup. Lookups of names the template never
//! authored fail with [`ContentError::MissingObject`], so content mistakes
//! surface at the first generation call that touches them. The
//! [`RoomContainer`] owns the single current room and handles its lifecycle.

mod container;
mod template;

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use lucid_core::{ContentError, ObjectName, RoomId};

pub use container::{RoomContainer, ACTIVE_ROOM_TAG};
pub use template::RoomTemplate;

/// Placement applied to every room spawned by a container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomTransform {
    origin: Vec3,
    orientation: Quat,
}

impl RoomTransform {
    /// Transform anchored at the world origin with no rotation.
    pub const IDENTITY: Self = Self {
        origin: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Creates a transform from an origin and an orientation.
    #[must_use]
    pub const fn new(origin: Vec3, orientation: Quat) -> Self {
        Self {
            origin,
            orientation,
        }
    }

    /// World-space position of the room's anchor.
    #[must_use]
    pub const fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Orientation of the room relative to the world.
    #[must_use]
    pub const fn orientation(&self) -> Quat {
        self.orientation
    }
}

impl Default for RoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Mutable sub-object stored inside a room.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomObject {
    active: bool,
    rotation_degrees: f32,
    text: Option<String>,
}

impl RoomObject {
    /// Visible object with no rotation and no text.
    #[must_use]
    pub const fn visible() -> Self {
        Self {
            active: true,
            rotation_degrees: 0.0,
            text: None,
        }
    }

    /// Object that starts hidden.
    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            active: false,
            rotation_degrees: 0.0,
            text: None,
        }
    }

    /// Visible object displaying the provided text.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            active: true,
            rotation_degrees: 0.0,
            text: Some(text.into()),
        }
    }

    /// Reports whether the object is currently shown.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Shows or hides the object.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Rotation about the object's local Z axis, in degrees.
    #[must_use]
    pub const fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    /// Overwrites the rotation about the object's local Z axis.
    pub fn set_rotation_degrees(&mut self, degrees: f32) {
        self.rotation_degrees = degrees;
    }

    /// Text currently displayed by the object, if it has a text payload.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replaces the text payload.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }
}

/// A single instantiated room.
#[derive(Clone, Debug)]
pub struct Room {
    id: RoomId,
    parent: &'static str,
    transform: RoomTransform,
    objects: BTreeMap<ObjectName, RoomObject>,
}

impl Room {
    pub(crate) fn new(
        id: RoomId,
        parent: &'static str,
        transform: RoomTransform,
        objects: BTreeMap<ObjectName, RoomObject>,
    ) -> Self {
        Self {
            id,
            parent,
            transform,
            objects,
        }
    }

    /// Identifier allocated by the owning container.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Tag of the container the room is parented under.
    #[must_use]
    pub const fn parent(&self) -> &'static str {
        self.parent
    }

    /// Spawn placement of the room.
    #[must_use]
    pub const fn transform(&self) -> RoomTransform {
        self.transform
    }

    /// Looks up a required object.
    pub fn object(&self, name: ObjectName) -> Result<&RoomObject, ContentError> {
        self.objects.get(&name).ok_or(ContentError::MissingObject {
            room: self.id,
            name,
        })
    }

    /// Looks up a required object for mutation.
    pub fn object_mut(&mut self, name: ObjectName) -> Result<&mut RoomObject, ContentError> {
        let room = self.id;
        self.objects
            .get_mut(&name)
            .ok_or(ContentError::MissingObject { room, name })
    }
}

/// Query functions that provide read-only access to a room.
pub mod query {
    use super::{ObjectName, Room, RoomObject};

    /// Reports whether the room authored an object with the provided name.
    #[must_use]
    pub fn contains(room: &Room, name: ObjectName) -> bool {
        room.objects.contains_key(&name)
    }

    /// Enumerates the objects stored in the room in name order.
    pub fn objects(room: &Room) -> impl Iterator<Item = (ObjectName, &RoomObject)> {
        room.objects.iter().map(|(name, object)| (*name, object))
    }

    /// Names of the objects currently hidden.
    #[must_use]
    pub fn hidden_objects(room: &Room) -> Vec<ObjectName> {
        room.objects
            .iter()
            .filter(|(_, object)| !object.is_active())
            .map(|(name, _)| *name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucid_core::objects;

    fn sample_room() -> Room {
        RoomTemplate::new("sample")
            .with_object(objects::PIANO, RoomObject::visible())
            .with_object(objects::TUTORIAL_IMAGE, RoomObject::hidden())
            .instantiate(RoomId::new(9), ACTIVE_ROOM_TAG, RoomTransform::IDENTITY)
    }

    #[test]
    fn object_lookup_reports_missing_names() {
        let mut room = sample_room();
        assert!(room.object(objects::PIANO).is_ok());
        assert_eq!(
            room.object_mut(objects::LAPTOP).unwrap_err(),
            ContentError::MissingObject {
                room: RoomId::new(9),
                name: objects::LAPTOP,
            }
        );
    }

    #[test]
    fn hidden_objects_track_visibility_changes() {
        let mut room = sample_room();
        assert_eq!(query::hidden_objects(&room), vec![objects::TUTORIAL_IMAGE]);

        room.object_mut(objects::PIANO)
            .expect("piano")
            .set_active(false);
        room.object_mut(objects::TUTORIAL_IMAGE)
            .expect("banner")
            .set_active(true);

        assert_eq!(query::hidden_objects(&room), vec![objects::PIANO]);
    }

    #[test]
    fn text_and_rotation_are_independent_of_visibility() {
        let mut object = RoomObject::with_text("00:00");
        object.set_rotation_degrees(90.0);
        object.set_active(false);
        object.set_text("03:00");

        assert_eq!(object.text(), Some("03:00"));
        assert!((object.rotation_degrees() - 90.0).abs() < f32::EPSILON);
        assert!(!object.is_active());
    }
}
