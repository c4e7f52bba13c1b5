use serde::{Deserialize, Serialize};

use crate::{ChatEntry, PlaybackState, RoomError, RoomId};

/// Events sent by a client over its session.
///
/// String fields that are absent from the payload deserialize as empty, and
/// are rejected by [ClientEvent::validate] before anything touches a room.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Join a room, becoming its host if it has none.
    JoinRoom {
        #[serde(default)]
        room_id: RoomId,
        #[serde(default)]
        username: String,
    },
    /// Leave a room, handing the host role over if needed.
    LeaveRoom {
        #[serde(default)]
        room_id: RoomId,
        #[serde(default)]
        username: String,
    },
    /// Post a message to the room's chat.
    ChatMessage {
        #[serde(default)]
        room_id: RoomId,
        #[serde(default)]
        username: String,
        #[serde(default)]
        message: String,
    },
    /// Append a media reference to the queue.
    Enqueue {
        #[serde(default)]
        room_id: RoomId,
        #[serde(default, alias = "videoId")]
        media_ref: String,
    },
    /// Remove the first occurrence of a media reference from the queue.
    Dequeue {
        #[serde(default)]
        room_id: RoomId,
        #[serde(default, alias = "videoId")]
        media_ref: String,
    },
    Play {
        #[serde(default)]
        room_id: RoomId,
    },
    Pause {
        #[serde(default)]
        room_id: RoomId,
    },
    Seek {
        #[serde(default)]
        room_id: RoomId,
        #[serde(default)]
        time: Option<f64>,
    },
    /// Advance to the next item in the queue.
    Next {
        #[serde(default)]
        room_id: RoomId,
    },
    /// Ask for the current playback state, answered only to the sender.
    SyncRequest {
        #[serde(default)]
        room_id: RoomId,
    },
    /// Remove a member from the room. Only honored when `host` is the current host.
    KickUser {
        #[serde(default)]
        room_id: RoomId,
        #[serde(default)]
        username: String,
        #[serde(default)]
        host: String,
    },
}

/// Events sent to sessions, either to a whole room or to a single session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// The session joined a room.
    Joined { room_id: RoomId, username: String },
    /// The members of the room changed.
    UserList { users: Vec<String> },
    /// The host of the room changed.
    HostUpdate { host: Option<String> },
    /// The full chat history, sent to a session when it joins.
    ChatHistory { messages: Vec<ChatEntry> },
    /// A single new chat message.
    ChatMessage(ChatEntry),
    /// The queue or the current index changed.
    QueueUpdate {
        queue: Vec<String>,
        current_index: usize,
    },
    /// Receivers resume from their locally tracked time.
    Play,
    Pause,
    Seek { time: f64 },
    /// The server's playback checkpoint, in reply to a sync request.
    SyncState { playback_state: PlaybackState },
    /// Someone was kicked from the room. Receivers decide if it was them.
    Kicked { room_id: RoomId },
    Error { message: String },
}

impl ClientEvent {
    /// Returns the name of the event as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinRoom { .. } => "join_room",
            Self::LeaveRoom { .. } => "leave_room",
            Self::ChatMessage { .. } => "chat_message",
            Self::Enqueue { .. } => "enqueue",
            Self::Dequeue { .. } => "dequeue",
            Self::Play { .. } => "play",
            Self::Pause { .. } => "pause",
            Self::Seek { .. } => "seek",
            Self::Next { .. } => "next",
            Self::SyncRequest { .. } => "sync_request",
            Self::KickUser { .. } => "kick_user",
        }
    }

    /// Returns the room this event targets.
    pub fn room_id(&self) -> &str {
        match self {
            Self::JoinRoom { room_id, .. }
            | Self::LeaveRoom { room_id, .. }
            | Self::ChatMessage { room_id, .. }
            | Self::Enqueue { room_id, .. }
            | Self::Dequeue { room_id, .. }
            | Self::Play { room_id }
            | Self::Pause { room_id }
            | Self::Seek { room_id, .. }
            | Self::Next { room_id }
            | Self::SyncRequest { room_id }
            | Self::KickUser { room_id, .. } => room_id,
        }
    }

    /// Checks that every required field is present.
    pub fn validate(&self) -> Result<(), RoomError> {
        if self.room_id().is_empty() {
            return Err(RoomError::InvalidInput("roomId"));
        }

        let missing = match self {
            Self::JoinRoom { username, .. } | Self::LeaveRoom { username, .. } => {
                username.is_empty().then_some("username")
            }
            Self::ChatMessage {
                username, message, ..
            } => {
                if username.is_empty() {
                    Some("username")
                } else if message.is_empty() {
                    Some("message")
                } else {
                    None
                }
            }
            Self::Enqueue { media_ref, .. } | Self::Dequeue { media_ref, .. } => {
                media_ref.is_empty().then_some("mediaRef")
            }
            Self::Seek { time, .. } => time.is_none().then_some("time"),
            Self::KickUser { username, host, .. } => {
                if username.is_empty() {
                    Some("username")
                } else if host.is_empty() {
                    Some("host")
                } else {
                    None
                }
            }
            Self::Play { .. } | Self::Pause { .. } | Self::Next { .. } | Self::SyncRequest { .. } => {
                None
            }
        };

        match missing {
            Some(field) => Err(RoomError::InvalidInput(field)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::{ClientEvent, ServerEvent};
    use crate::{PlaybackState, RoomError};

    fn parse(value: serde_json::Value) -> ClientEvent {
        serde_json::from_value(value).expect("event parses")
    }

    #[test]
    fn client_events_parse_camel_case_fields() {
        let event = parse(json!({
            "type": "kick_user",
            "roomId": "ABCD1234",
            "username": "bob",
            "host": "alice"
        }));

        assert_eq!(
            event,
            ClientEvent::KickUser {
                room_id: "ABCD1234".to_string(),
                username: "bob".to_string(),
                host: "alice".to_string(),
            }
        );
        assert_eq!(event.validate(), Ok(()));
    }

    #[test]
    fn video_id_is_accepted_as_media_ref() {
        let event = parse(json!({ "type": "enqueue", "roomId": "R", "videoId": "v1" }));

        assert_eq!(
            event,
            ClientEvent::Enqueue {
                room_id: "R".to_string(),
                media_ref: "v1".to_string(),
            }
        );
    }

    #[test]
    fn missing_fields_are_rejected_by_validation() {
        let no_room = parse(json!({ "type": "play" }));
        assert_eq!(no_room.validate(), Err(RoomError::InvalidInput("roomId")));

        let no_time = parse(json!({ "type": "seek", "roomId": "R" }));
        assert_eq!(no_time.validate(), Err(RoomError::InvalidInput("time")));

        let no_message = parse(json!({ "type": "chat_message", "roomId": "R", "username": "a" }));
        assert_eq!(
            no_message.validate(),
            Err(RoomError::InvalidInput("message"))
        );

        let no_media = parse(json!({ "type": "enqueue", "roomId": "R", "mediaRef": "" }));
        assert_eq!(no_media.validate(), Err(RoomError::InvalidInput("mediaRef")));
    }

    #[test]
    fn unknown_event_types_fail_to_parse() {
        let result = serde_json::from_value::<ClientEvent>(json!({ "type": "explode" }));
        assert!(result.is_err());
    }

    #[test]
    fn server_events_serialize_with_wire_names() {
        let update = ServerEvent::QueueUpdate {
            queue: vec!["v1".to_string()],
            current_index: 0,
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "type": "queue_update", "queue": ["v1"], "currentIndex": 0 })
        );

        assert_eq!(
            serde_json::to_value(&ServerEvent::Play).unwrap(),
            json!({ "type": "play" })
        );

        let sync = ServerEvent::SyncState {
            playback_state: PlaybackState {
                time: 12.5,
                playing: true,
            },
        };
        assert_eq!(
            serde_json::to_value(&sync).unwrap(),
            json!({ "type": "sync_state", "playbackState": { "time": 12.5, "playing": true } })
        );
    }
}
