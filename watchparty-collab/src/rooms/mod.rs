mod chat;
mod membership;
mod playback;
mod queue;
mod room;

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use log::info;
use thiserror::Error;

pub use membership::JoinResult;
pub use room::*;

use crate::{random_room_token, CollabContext};

/// Creates and looks up rooms. Rooms live until the process exits.
pub struct RoomManager {
    context: CollabContext,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoomError {
    #[error("{resource} not found")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },
    #[error("{0} is required")]
    InvalidInput(&'static str),
    #[error("Only the host can do that")]
    Unauthorized,
}

impl RoomManager {
    pub fn new(context: &CollabContext) -> Self {
        Self {
            context: context.clone(),
        }
    }

    /// Creates a new empty room with an id no other room has.
    pub fn create_room(&self) -> Arc<Room> {
        loop {
            let id = random_room_token(self.context.config.room_id_length);

            // The entry holds the shard lock, so no other room can claim the id meanwhile
            if let Entry::Vacant(entry) = self.context.rooms.entry(id.clone()) {
                let room = Arc::new(Room::new(&self.context, id));
                entry.insert(room.clone());

                info!("Created room {}", room.id());
                return room;
            }
        }
    }

    pub fn room_by_id(&self, id: &str) -> Result<Arc<Room>, RoomError> {
        self.context
            .rooms
            .get(id)
            .map(|r| r.value().clone())
            .ok_or_else(|| RoomError::NotFound {
                resource: "Room",
                identifier: id.to_string(),
            })
    }

    /// Get all rooms in memory
    pub fn list_all(&self) -> Vec<Arc<Room>> {
        self.context.rooms.iter().map(|r| r.value().clone()).collect()
    }
}

/// A fresh room in a fresh collab system.
#[cfg(test)]
pub(crate) fn test_room() -> (crate::Collab, Arc<Room>) {
    let collab = crate::Collab::default();
    let room = collab.rooms.create_room();

    (collab, room)
}
