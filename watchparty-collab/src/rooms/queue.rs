use log::{debug, info};

use crate::{PlaybackState, RoomError};

use super::Room;

impl Room {
    /// Appends a media reference to the queue.
    pub fn enqueue(&self, media_ref: &str) -> Result<(), RoomError> {
        if media_ref.is_empty() {
            return Err(RoomError::InvalidInput("mediaRef"));
        }

        let mut state = self.lock();
        state.queue.push(media_ref.to_string());

        self.broadcast(state.queue_update());
        info!("Added {} to the queue in room {}", media_ref, self.id());

        Ok(())
    }

    /// Removes the first occurrence of a media reference from the queue.
    ///
    /// The current index is only clamped back into range, never re-pointed, so
    /// removing an item before the current one shifts what is playing.
    pub fn remove(&self, media_ref: &str) -> Result<(), RoomError> {
        let mut state = self.lock();

        let position = state
            .queue
            .iter()
            .position(|m| m == media_ref)
            .ok_or_else(|| RoomError::NotFound {
                resource: "Queue item",
                identifier: media_ref.to_string(),
            })?;

        state.queue.remove(position);

        if state.current_index >= state.queue.len() {
            state.current_index = state.queue.len().saturating_sub(1);
        }

        self.broadcast(state.queue_update());
        info!("Removed {} from the queue in room {}", media_ref, self.id());

        Ok(())
    }

    /// Moves to the next item and restarts playback from the beginning.
    /// Returns false if the queue was already at its last item.
    pub fn advance(&self) -> bool {
        let mut state = self.lock();

        if state.current_index + 1 >= state.queue.len() {
            debug!("Room {} is already at the end of its queue", self.id());
            return false;
        }

        state.current_index += 1;
        state.playback_state = PlaybackState {
            time: 0.,
            playing: true,
        };

        self.broadcast(state.queue_update());
        info!(
            "Room {} advanced to queue index {}",
            self.id(),
            state.current_index
        );

        true
    }
}
