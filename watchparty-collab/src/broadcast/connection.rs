use std::{
    collections::VecDeque,
    pin::Pin,
    sync::{Arc, Weak},
    task::{Context, Poll, Waker},
};

use futures_util::Stream;
use parking_lot::Mutex;

use crate::{Id, RoomId, ServerEvent};

use super::Mediator;

pub type SessionId = Id<Connection>;

/// A live session that can receive events.
pub struct Connection {
    pub(super) id: SessionId,
    /// The room whose broadcasts this session receives, if any
    pub(super) room: Mutex<Option<RoomId>>,
    pending_events: Mutex<VecDeque<ServerEvent>>,
    waker: Mutex<Option<Waker>>,
}

/// The receiving end of a [Connection].
/// When this is dropped, the session is removed from the mediator.
pub struct ConnectionHandle {
    connection: Arc<Connection>,
    /// Required to remove the connection when dropped
    mediator: Weak<Mediator>,
}

impl Connection {
    pub(super) fn new() -> Self {
        Self {
            id: SessionId::new(),
            room: Default::default(),
            pending_events: Default::default(),
            waker: Default::default(),
        }
    }

    pub(super) fn send(&self, event: ServerEvent) {
        self.pending_events.lock().push_back(event);

        if let Some(waker) = self.waker.lock().take() {
            waker.wake()
        }
    }

    pub(super) fn is_in_room(&self, room_id: &str) -> bool {
        self.room.lock().as_deref() == Some(room_id)
    }

    pub(super) fn handle(self: &Arc<Self>, mediator: Weak<Mediator>) -> ConnectionHandle {
        ConnectionHandle {
            connection: self.clone(),
            mediator,
        }
    }
}

impl ConnectionHandle {
    pub fn id(&self) -> SessionId {
        self.connection.id
    }

    /// Takes every event that has not been polled yet.
    #[cfg(test)]
    pub fn drain(&self) -> Vec<ServerEvent> {
        self.connection.pending_events.lock().drain(..).collect()
    }
}

impl Stream for ConnectionHandle {
    type Item = ServerEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // Held until the waker is stored, so a concurrent send cannot slip in between
        let mut pending_events = self.connection.pending_events.lock();

        if let Some(event) = pending_events.pop_front() {
            return Poll::Ready(Some(event));
        }

        *self.connection.waker.lock() = Some(cx.waker().clone());
        Poll::Pending
    }
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        if let Some(mediator) = self.mediator.upgrade() {
            mediator.disconnect(self.connection.id)
        }
    }
}
