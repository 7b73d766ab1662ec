//! Lifecycle management for the single current room.

use log::{debug, warn};
use lucid_core::RoomId;

use crate::{Room, RoomTemplate, RoomTransform};

/// Tag applied to rooms spawned under the default container.
pub const ACTIVE_ROOM_TAG: &str = "ActiveRoom";

/// Owns the current room and rebuilds it from a template on request.
///
/// At most one room exists at a time. Strategies and clock sync only ever see
/// a transient `&mut Room` borrowed from the container.
#[derive(Debug)]
pub struct RoomContainer {
    tag: &'static str,
    template: RoomTemplate,
    spawn: RoomTransform,
    current: Option<Room>,
    next_room_id: RoomId,
}

impl RoomContainer {
    /// Creates an empty container that spawns rooms at the identity transform.
    #[must_use]
    pub fn new(template: RoomTemplate) -> Self {
        Self::with_spawn(template, ACTIVE_ROOM_TAG, RoomTransform::IDENTITY)
    }

    /// Creates an empty container with an explicit tag and spawn transform.
    #[must_use]
    pub fn with_spawn(template: RoomTemplate, tag: &'static str, spawn: RoomTransform) -> Self {
        Self {
            tag,
            template,
            spawn,
            current: None,
            next_room_id: RoomId::new(0),
        }
    }

    /// Destroys the current room, if any.
    ///
    /// Returns the identifier of the destroyed room. Calling this without a
    /// current room is a no-op.
    pub fn cleanup_current(&mut self) -> Option<RoomId> {
        let room = self.current.take()?;
        debug!("destroyed room {} tagged {}", room.id(), room.parent());
        Some(room.id())
    }

    /// Instantiates a fresh room from the template and makes it current.
    pub fn create_room(&mut self) -> &mut Room {
        if let Some(stale) = self.cleanup_current() {
            warn!("room {stale} was still current when a new room was requested");
        }

        let id = self.allocate_id();
        let room = self.template.instantiate(id, self.tag, self.spawn);
        debug!(
            "created room {id} from template `{}` under {}",
            self.template.name(),
            self.tag
        );
        self.current.insert(room)
    }

    /// Room currently owned by the container.
    #[must_use]
    pub fn current(&self) -> Option<&Room> {
        self.current.as_ref()
    }

    /// Mutable access to the room currently owned by the container.
    pub fn current_mut(&mut self) -> Option<&mut Room> {
        self.current.as_mut()
    }

    /// Tag applied to every room spawned by this container.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Template rooms are instantiated from.
    #[must_use]
    pub const fn template(&self) -> &RoomTemplate {
        &self.template
    }

    fn allocate_id(&mut self) -> RoomId {
        let id = self.next_room_id;
        self.next_room_id = RoomId::new(id.get().wrapping_add(1));
        id
    }
}
