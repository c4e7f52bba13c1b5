use log::info;

use crate::{RoomError, ServerEvent, SessionId};

use super::Room;

impl Room {
    pub fn play(&self) {
        let mut state = self.lock();
        state.playback_state.playing = true;

        self.broadcast(ServerEvent::Play);
        info!("Play in room {}", self.id());
    }

    pub fn pause(&self) {
        let mut state = self.lock();
        state.playback_state.playing = false;

        self.broadcast(ServerEvent::Pause);
        info!("Pause in room {}", self.id());
    }

    /// Moves the playback checkpoint to `time`, in seconds.
    pub fn seek(&self, time: Option<f64>) -> Result<(), RoomError> {
        let time = time.ok_or(RoomError::InvalidInput("time"))?;

        let mut state = self.lock();
        state.playback_state.time = time;

        self.broadcast(ServerEvent::Seek { time });
        info!("Seek in room {} to {}", self.id(), time);

        Ok(())
    }

    /// Sends the current playback checkpoint to one session.
    pub fn sync(&self, session: SessionId) {
        let state = self.lock();

        self.mediator().unicast(
            session,
            ServerEvent::SyncState {
                playback_state: state.playback_state,
            },
        );
    }
}
