use std::{collections::VecDeque, sync::Arc};

use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;

use crate::{CollabContext, Config, Mediator, ServerEvent};

pub type RoomId = String;

/// A watch session, with its members, queue, playback checkpoint and chat.
///
/// Every mutation locks the room's state for the whole read-modify-broadcast,
/// so events for the same room never interleave.
pub struct Room {
    id: RoomId,
    config: Config,
    mediator: Arc<Mediator>,
    state: Mutex<RoomState>,
}

/// The mutable part of a [Room].
///
/// `current_index` stays within `0..=max(0, queue.len() - 1)`, `host` is always
/// `None` or one of `members`, and `members` holds no duplicates.
#[derive(Debug, Default)]
pub struct RoomState {
    pub host: Option<String>,
    /// Usernames, in the order they joined
    pub members: Vec<String>,
    pub chat_history: VecDeque<ChatEntry>,
    /// Opaque media references, duplicates allowed
    pub queue: Vec<String>,
    pub current_index: usize,
    pub playback_state: PlaybackState,
}

/// The server's last known playback position. Clients advance time locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlaybackState {
    /// Seconds into the current item
    pub time: f64,
    pub playing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatEntry {
    pub username: String,
    pub message: String,
    /// Milliseconds since the unix epoch
    pub timestamp: i64,
}

/// A snapshot of a room's state at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomData {
    pub id: RoomId,
    pub host: Option<String>,
    pub members: Vec<String>,
    pub queue: Vec<String>,
    pub current_index: usize,
    pub playback_state: PlaybackState,
}

impl Room {
    pub fn new(context: &CollabContext, id: RoomId) -> Self {
        Self {
            id,
            config: context.config.clone(),
            mediator: context.mediator.clone(),
            state: Default::default(),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub(super) fn config(&self) -> &Config {
        &self.config
    }

    pub(super) fn mediator(&self) -> &Mediator {
        &self.mediator
    }

    pub fn data(&self) -> RoomData {
        let state = self.state.lock();

        RoomData {
            id: self.id.clone(),
            host: state.host.clone(),
            members: state.members.clone(),
            queue: state.queue.clone(),
            current_index: state.current_index,
            playback_state: state.playback_state,
        }
    }

    /// Returns the chat history, oldest first.
    pub fn chat_history(&self) -> Vec<ChatEntry> {
        self.state.lock().chat_history.iter().cloned().collect()
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, RoomState> {
        self.state.lock()
    }

    pub(super) fn broadcast(&self, event: ServerEvent) {
        self.mediator.broadcast(&self.id, event)
    }
}

impl RoomState {
    pub(super) fn queue_update(&self) -> ServerEvent {
        ServerEvent::QueueUpdate {
            queue: self.queue.clone(),
            current_index: self.current_index,
        }
    }

    pub(super) fn user_list(&self) -> ServerEvent {
        ServerEvent::UserList {
            users: self.members.clone(),
        }
    }

    pub(super) fn is_member(&self, username: &str) -> bool {
        self.members.iter().any(|m| m == username)
    }

    /// Removes a member, returning false if they were not in the room.
    pub(super) fn remove_member(&mut self, username: &str) -> bool {
        match self.members.iter().position(|m| m == username) {
            Some(position) => {
                self.members.remove(position);
                true
            }
            None => false,
        }
    }
}
