//! Authoring-time description of the objects a room is built from.

use std::collections::BTreeMap;

use lucid_core::{ObjectName, RoomId};

use crate::{Room, RoomObject, RoomTransform};

/// Blueprint that every generated room is instantiated from.
#[derive(Clone, Debug)]
pub struct RoomTemplate {
    name: &'static str,
    objects: BTreeMap<ObjectName, RoomObject>,
}

impl RoomTemplate {
    /// Creates an empty template.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            objects: BTreeMap::new(),
        }
    }

    /// Adds an object, replacing any earlier entry with the same name.
    #[must_use]
    pub fn with_object(mut self, name: ObjectName, object: RoomObject) -> Self {
        let _ = self.objects.insert(name, object);
        self
    }

    /// Drops an object from the template.
    #[must_use]
    pub fn without_object(mut self, name: ObjectName) -> Self {
        let _ = self.objects.remove(&name);
        self
    }

    /// Name the template was authored under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of objects authored in the template.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Reports whether the template authors no objects at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Builds a fresh room with pristine copies of every object.
    #[must_use]
    pub fn instantiate(&self, id: RoomId, parent: &'static str, transform: RoomTransform) -> Room {
        Room::new(id, parent, transform, self.objects.clone())
    }
}
