use log::debug;

use crate::{ClientEvent, Collab, RoomError, ServerEvent, SessionId};

impl Collab {
    /// Applies an event sent by a session.
    ///
    /// Most bad or stale events are dropped quietly. Only joining a missing room
    /// and enqueueing without a media reference are answered with an error.
    pub fn handle(&self, session: SessionId, event: ClientEvent) {
        if let Err(error) = self.try_handle(session, &event) {
            if is_reported(&event, &error) {
                self.mediator().unicast(
                    session,
                    ServerEvent::Error {
                        message: error.to_string(),
                    },
                );
            }

            debug!(
                "Ignored {} from session {} for room {}: {}",
                event.name(),
                session,
                event.room_id(),
                error
            );
        }
    }

    fn try_handle(&self, session: SessionId, event: &ClientEvent) -> Result<(), RoomError> {
        event.validate()?;
        let room = self.rooms.room_by_id(event.room_id())?;

        match event {
            ClientEvent::JoinRoom { username, .. } => room.join(username, session).map(|_| ()),
            ClientEvent::LeaveRoom { username, .. } => {
                room.leave(username, session);
                Ok(())
            }
            ClientEvent::ChatMessage {
                username, message, ..
            } => room.post_message(username, message),
            ClientEvent::Enqueue { media_ref, .. } => room.enqueue(media_ref),
            ClientEvent::Dequeue { media_ref, .. } => room.remove(media_ref),
            ClientEvent::Play { .. } => {
                room.play();
                Ok(())
            }
            ClientEvent::Pause { .. } => {
                room.pause();
                Ok(())
            }
            ClientEvent::Seek { time, .. } => room.seek(*time),
            ClientEvent::Next { .. } => {
                room.advance();
                Ok(())
            }
            ClientEvent::SyncRequest { .. } => {
                room.sync(session);
                Ok(())
            }
            ClientEvent::KickUser { username, host, .. } => room.kick(username, host),
        }
    }
}

fn is_reported(event: &ClientEvent, error: &RoomError) -> bool {
    matches!(
        (event, error),
        (
            ClientEvent::JoinRoom { .. },
            RoomError::NotFound {
                resource: "Room",
                ..
            }
        ) | (ClientEvent::Enqueue { .. }, RoomError::InvalidInput("mediaRef"))
    )
}
