use chrono::Utc;
use log::info;

use crate::{ChatEntry, RoomError, ServerEvent};

use super::Room;

impl Room {
    /// Appends a message to the chat, dropping the oldest past the history limit.
    pub fn post_message(&self, username: &str, message: &str) -> Result<(), RoomError> {
        if username.is_empty() {
            return Err(RoomError::InvalidInput("username"));
        }

        if message.is_empty() {
            return Err(RoomError::InvalidInput("message"));
        }

        let entry = ChatEntry {
            username: username.to_string(),
            message: message.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        };

        let mut state = self.lock();
        let limit = self.config().chat_history_limit;

        state.chat_history.push_back(entry.clone());
        while state.chat_history.len() > limit {
            state.chat_history.pop_front();
        }

        self.broadcast(ServerEvent::ChatMessage(entry));
        info!("Chat in room {} from {}: {}", self.id(), username, message);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{rooms::test_room, RoomError, ServerEvent};

    #[test]
    fn messages_are_broadcast_one_at_a_time() {
        let (collab, room) = test_room();
        let alice = collab.connect();
        room.join("alice", alice.id()).unwrap();
        alice.drain();

        room.post_message("alice", "hello").unwrap();

        let events = alice.drain();
        assert_eq!(events.len(), 1);

        match &events[0] {
            ServerEvent::ChatMessage(entry) => {
                assert_eq!(entry.username, "alice");
                assert_eq!(entry.message, "hello");
                assert!(entry.timestamp > 0);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn history_keeps_the_last_hundred() {
        let (_collab, room) = test_room();

        for i in 0..101 {
            room.post_message("alice", &format!("message {i}")).unwrap();
        }

        let history = room.chat_history();
        assert_eq!(history.len(), 100);
        assert_eq!(history.first().unwrap().message, "message 1");
        assert_eq!(history.last().unwrap().message, "message 100");

        let in_order = history
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp);
        assert!(in_order);
    }

    #[test]
    fn empty_messages_are_ignored() {
        let (_collab, room) = test_room();

        assert_eq!(
            room.post_message("alice", ""),
            Err(RoomError::InvalidInput("message"))
        );
        assert_eq!(
            room.post_message("", "hi"),
            Err(RoomError::InvalidInput("username"))
        );
        assert!(room.chat_history().is_empty());
    }

    #[test]
    fn joiners_receive_the_history() {
        let (collab, room) = test_room();
        room.post_message("alice", "first").unwrap();
        room.post_message("alice", "second").unwrap();

        let bob = collab.connect();
        room.join("bob", bob.id()).unwrap();

        let history = bob
            .drain()
            .into_iter()
            .find_map(|e| match e {
                ServerEvent::ChatHistory { messages } => Some(messages),
                _ => None,
            })
            .unwrap();

        let messages: Vec<_> = history.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
