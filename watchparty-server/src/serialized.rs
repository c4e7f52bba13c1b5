//! Response bodies of the HTTP endpoints

use serde::Serialize;
use watchparty_collab::{RoomData, RoomId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRoom {
    pub room_id: RoomId,
}

/// Whether a room exists, and its state if it does.
#[derive(Debug, Serialize)]
pub struct RoomInfo {
    exists: bool,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    room: Option<RoomData>,
}

#[derive(Debug, Serialize)]
pub struct Success {
    success: bool,
}

impl From<Option<RoomData>> for RoomInfo {
    fn from(room: Option<RoomData>) -> Self {
        Self {
            exists: room.is_some(),
            room,
        }
    }
}

impl Success {
    pub fn new() -> Self {
        Self { success: true }
    }
}
