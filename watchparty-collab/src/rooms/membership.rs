use log::{debug, info};

use crate::{RoomError, ServerEvent, SessionId};

use super::Room;

/// The outcome of a successful join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinResult {
    /// Whether the joining user became the host
    pub assigned_host: bool,
}

impl Room {
    /// Adds a user to the room and brings the joining session up to date.
    ///
    /// Joining twice is allowed and does not duplicate the member, but the state
    /// is sent again so a reconnecting client can resynchronize.
    pub fn join(&self, username: &str, session: SessionId) -> Result<JoinResult, RoomError> {
        if username.is_empty() {
            return Err(RoomError::InvalidInput("username"));
        }

        let mut state = self.lock();
        let mediator = self.mediator();

        mediator.bind(session, self.id());

        if !state.is_member(username) {
            state.members.push(username.to_string());
        }

        let assigned_host = state.host.is_none();
        if assigned_host {
            state.host = Some(username.to_string());
        }

        mediator.unicast(
            session,
            ServerEvent::Joined {
                room_id: self.id().clone(),
                username: username.to_string(),
            },
        );
        self.broadcast(state.user_list());
        self.broadcast(ServerEvent::HostUpdate {
            host: state.host.clone(),
        });
        mediator.unicast(
            session,
            ServerEvent::ChatHistory {
                messages: state.chat_history.iter().cloned().collect(),
            },
        );
        self.broadcast(state.queue_update());
        mediator.unicast(
            session,
            ServerEvent::SyncState {
                playback_state: state.playback_state,
            },
        );

        info!(
            "User {} joined room {}, host is {}",
            username,
            self.id(),
            state.host.as_deref().unwrap_or_default()
        );

        Ok(JoinResult { assigned_host })
    }

    /// Removes a user from the room, handing the host role to the earliest
    /// remaining member if the host left.
    pub fn leave(&self, username: &str, session: SessionId) {
        let mut state = self.lock();

        if !state.remove_member(username) {
            debug!("User {} is not in room {}", username, self.id());
            return;
        }

        if state.host.as_deref() == Some(username) {
            state.host = state.members.first().cloned();

            if let Some(host) = &state.host {
                info!("New host in room {}: {}", self.id(), host);
                self.broadcast(ServerEvent::HostUpdate {
                    host: Some(host.clone()),
                });
            }
        }

        self.broadcast(state.user_list());
        self.mediator().unbind(session, self.id());

        info!("User {} left room {}", username, self.id());
    }

    /// Removes a member on behalf of the host.
    ///
    /// The host role is not handed over, even when the host kicks themselves.
    pub fn kick(&self, username: &str, requesting_host: &str) -> Result<(), RoomError> {
        let mut state = self.lock();

        if state.host.as_deref() != Some(requesting_host) {
            return Err(RoomError::Unauthorized);
        }

        if !state.remove_member(username) {
            debug!("User {} is not in room {}", username, self.id());
            return Ok(());
        }

        self.broadcast(state.user_list());
        self.broadcast(ServerEvent::Kicked {
            room_id: self.id().clone(),
        });

        info!(
            "Host {} kicked user {} from room {}",
            requesting_host,
            username,
            self.id()
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::{sync::Arc, thread};

    use crate::{rooms::test_room, JoinResult, PlaybackState, RoomError, ServerEvent};

    #[test]
    fn first_joiner_becomes_host() {
        let (collab, room) = test_room();
        let alice = collab.connect();
        let bob = collab.connect();

        assert_eq!(
            room.join("alice", alice.id()),
            Ok(JoinResult {
                assigned_host: true
            })
        );
        assert_eq!(
            room.join("bob", bob.id()),
            Ok(JoinResult {
                assigned_host: false
            })
        );

        let data = room.data();
        assert_eq!(data.host.as_deref(), Some("alice"));
        assert_eq!(data.members, vec!["alice", "bob"]);
    }

    #[test]
    fn joining_sends_state_to_the_joiner_and_room() {
        let (collab, room) = test_room();
        let alice = collab.connect();
        let bob = collab.connect();

        room.join("alice", alice.id()).unwrap();
        alice.drain();

        room.join("bob", bob.id()).unwrap();

        let users = ServerEvent::UserList {
            users: vec!["alice".to_string(), "bob".to_string()],
        };
        let host = ServerEvent::HostUpdate {
            host: Some("alice".to_string()),
        };
        let queue = ServerEvent::QueueUpdate {
            queue: vec![],
            current_index: 0,
        };

        assert_eq!(
            bob.drain(),
            vec![
                ServerEvent::Joined {
                    room_id: room.id().clone(),
                    username: "bob".to_string()
                },
                users.clone(),
                host.clone(),
                ServerEvent::ChatHistory { messages: vec![] },
                queue.clone(),
                ServerEvent::SyncState {
                    playback_state: PlaybackState::default()
                },
            ]
        );

        // Others only get the room-wide part
        assert_eq!(alice.drain(), vec![users, host, queue]);
    }

    #[test]
    fn joining_twice_keeps_one_entry_but_resends_state() {
        let (collab, room) = test_room();
        let alice = collab.connect();

        room.join("alice", alice.id()).unwrap();
        alice.drain();
        room.join("alice", alice.id()).unwrap();

        assert_eq!(room.data().members, vec!["alice"]);
        assert!(matches!(
            alice.drain().first(),
            Some(ServerEvent::Joined { .. })
        ));
    }

    #[test]
    fn host_leaving_hands_over_to_earliest_member() {
        let (collab, room) = test_room();
        let alice = collab.connect();
        let bob = collab.connect();
        let carol = collab.connect();

        room.join("alice", alice.id()).unwrap();
        room.join("bob", bob.id()).unwrap();
        room.join("carol", carol.id()).unwrap();
        bob.drain();

        room.leave("alice", alice.id());

        let data = room.data();
        assert_eq!(data.host.as_deref(), Some("bob"));
        assert_eq!(data.members, vec!["bob", "carol"]);

        assert_eq!(
            bob.drain(),
            vec![
                ServerEvent::HostUpdate {
                    host: Some("bob".to_string())
                },
                ServerEvent::UserList {
                    users: vec!["bob".to_string(), "carol".to_string()]
                },
            ]
        );

        // The leaving session no longer receives room broadcasts
        alice.drain();
        room.broadcast(ServerEvent::Play);
        assert!(alice.drain().is_empty());
    }

    #[test]
    fn non_host_leaving_does_not_announce_a_host() {
        let (collab, room) = test_room();
        let alice = collab.connect();
        let bob = collab.connect();

        room.join("alice", alice.id()).unwrap();
        room.join("bob", bob.id()).unwrap();
        alice.drain();

        room.leave("bob", bob.id());

        assert_eq!(room.data().host.as_deref(), Some("alice"));
        assert_eq!(
            alice.drain(),
            vec![ServerEvent::UserList {
                users: vec!["alice".to_string()]
            }]
        );
    }

    #[test]
    fn last_member_leaving_clears_the_host() {
        let (collab, room) = test_room();
        let alice = collab.connect();

        room.join("alice", alice.id()).unwrap();
        room.leave("alice", alice.id());

        let data = room.data();
        assert_eq!(data.host, None);
        assert!(data.members.is_empty());

        // The next joiner takes over
        let bob = collab.connect();
        assert!(room.join("bob", bob.id()).unwrap().assigned_host);
    }

    #[test]
    fn leaving_when_absent_is_a_no_op() {
        let (collab, room) = test_room();
        let alice = collab.connect();

        room.join("alice", alice.id()).unwrap();
        alice.drain();

        room.leave("mallory", alice.id());

        assert_eq!(room.data().members, vec!["alice"]);
        assert!(alice.drain().is_empty());
    }

    #[test]
    fn only_the_host_can_kick() {
        let (collab, room) = test_room();
        let alice = collab.connect();
        let bob = collab.connect();

        room.join("alice", alice.id()).unwrap();
        room.join("bob", bob.id()).unwrap();
        alice.drain();

        assert_eq!(room.kick("alice", "bob"), Err(RoomError::Unauthorized));
        assert_eq!(room.data().members, vec!["alice", "bob"]);
        assert!(alice.drain().is_empty());

        assert_eq!(room.kick("bob", "alice"), Ok(()));
        assert_eq!(room.data().members, vec!["alice"]);
        assert_eq!(
            alice.drain(),
            vec![
                ServerEvent::UserList {
                    users: vec!["alice".to_string()]
                },
                ServerEvent::Kicked {
                    room_id: room.id().clone()
                },
            ]
        );

        // Kicking again is harmless
        assert_eq!(room.kick("bob", "alice"), Ok(()));
        assert!(alice.drain().is_empty());
    }

    #[test]
    fn kicking_the_host_keeps_the_host_role() {
        let (collab, room) = test_room();
        let alice = collab.connect();
        let bob = collab.connect();

        room.join("alice", alice.id()).unwrap();
        room.join("bob", bob.id()).unwrap();
        room.kick("alice", "alice").unwrap();

        let data = room.data();
        assert_eq!(data.members, vec!["bob"]);
        assert_eq!(data.host.as_deref(), Some("alice"));
    }

    #[test]
    fn concurrent_leaves_elect_a_single_member_host() {
        let (collab, room) = test_room();
        let names: Vec<String> = (0..16).map(|i| format!("user{i}")).collect();
        let sessions: Vec<_> = names.iter().map(|_| collab.connect()).collect();

        for (name, session) in names.iter().zip(&sessions) {
            room.join(name, session.id()).unwrap();
        }

        let leavers: Vec<_> = names
            .iter()
            .zip(&sessions)
            .take(8)
            .map(|(name, session)| {
                let room = Arc::clone(&room);
                let name = name.clone();
                let session = session.id();

                thread::spawn(move || room.leave(&name, session))
            })
            .collect();

        for leaver in leavers {
            leaver.join().unwrap();
        }

        let data = room.data();
        assert_eq!(data.members, names[8..].to_vec());
        assert_eq!(data.host.as_deref(), Some("user8"));
    }
}
