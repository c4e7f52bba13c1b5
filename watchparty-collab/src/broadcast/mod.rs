mod connection;

use std::sync::{Arc, Weak};

use log::{debug, info};
use parking_lot::Mutex;

pub use connection::*;

use crate::{RoomId, ServerEvent};

/// Who an event is delivered to.
#[derive(Debug, Clone)]
pub enum Recipients {
    /// Every session bound to the room
    Room(RoomId),
    /// Exactly one session
    Session(SessionId),
}

/// Delivers events to sessions.
///
/// Delivery is best-effort. Events are queued on each recipient in the order they
/// were sent, and a session that went away simply does not receive them.
pub struct Mediator {
    me: Weak<Self>,
    connections: Mutex<Vec<Arc<Connection>>>,
}

impl Mediator {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            connections: Default::default(),
        })
    }

    /// Registers a new session and returns the stream of events sent to it.
    pub fn connect(&self) -> ConnectionHandle {
        let connection = Arc::new(Connection::new());
        let handle = connection.handle(self.me.clone());

        self.connections.lock().push(connection);
        info!("Session {} connected", handle.id());

        handle
    }

    /// Adds a session to a room's broadcast group, leaving any previous one.
    pub fn bind(&self, session: SessionId, room_id: &RoomId) {
        if let Some(connection) = self.connection(session) {
            *connection.room.lock() = Some(room_id.clone());
        }
    }

    /// Removes a session from a room's broadcast group, if it is in it.
    pub fn unbind(&self, session: SessionId, room_id: &RoomId) {
        if let Some(connection) = self.connection(session) {
            let mut room = connection.room.lock();

            if room.as_ref() == Some(room_id) {
                *room = None;
            }
        }
    }

    /// Sends an event to every session in a room.
    pub fn broadcast(&self, room_id: &RoomId, event: ServerEvent) {
        self.send(event, Recipients::Room(room_id.clone()))
    }

    /// Sends an event to a single session.
    pub fn unicast(&self, session: SessionId, event: ServerEvent) {
        self.send(event, Recipients::Session(session))
    }

    pub fn send(&self, event: ServerEvent, recipients: Recipients) {
        let connections = self.connections.lock();

        connections
            .iter()
            .filter(|c| match &recipients {
                Recipients::Room(room_id) => c.is_in_room(room_id),
                Recipients::Session(session) => c.id == *session,
            })
            .for_each(|c| c.send(event.clone()));
    }

    /// Returns how many sessions are bound to a room.
    pub fn sessions_in_room(&self, room_id: &str) -> usize {
        self.connections
            .lock()
            .iter()
            .filter(|c| c.is_in_room(room_id))
            .count()
    }

    fn connection(&self, session: SessionId) -> Option<Arc<Connection>> {
        let connection = self
            .connections
            .lock()
            .iter()
            .find(|c| c.id == session)
            .cloned();

        if connection.is_none() {
            debug!("Session {} is not connected", session);
        }

        connection
    }

    /// Called when a [ConnectionHandle] is dropped
    fn disconnect(&self, session: SessionId) {
        self.connections.lock().retain(|c| c.id != session);
        info!("Session {} disconnected", session);
    }
}
