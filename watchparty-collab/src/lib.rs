mod broadcast;
mod config;
mod dispatch;
mod events;
mod rooms;
mod util;

use std::sync::Arc;

use dashmap::DashMap;

pub use broadcast::*;
pub use config::*;
pub use events::*;
pub use rooms::*;
pub use util::*;

// Reduces verbosity
type Store<Id, T> = Arc<DashMap<Id, Arc<T>>>;

/// The watchparty collab system, keeping rooms and their sessions in sync.
pub struct Collab {
    context: CollabContext,

    pub rooms: RoomManager,
}

/// A type passed to various components of the collab system, to access state and reach sessions.
#[derive(Clone)]
pub struct CollabContext {
    pub config: Config,
    pub mediator: Arc<Mediator>,

    pub rooms: Store<RoomId, Room>,
}

impl Collab {
    pub fn new(config: Config) -> Self {
        let context = CollabContext {
            config,
            mediator: Mediator::new(),
            rooms: Default::default(),
        };

        let room_manager = RoomManager::new(&context);

        Self {
            context,
            rooms: room_manager,
        }
    }

    /// Opens a new session. Events for it arrive on the returned handle.
    pub fn connect(&self) -> ConnectionHandle {
        self.context.mediator.connect()
    }

    pub fn mediator(&self) -> &Mediator {
        &self.context.mediator
    }
}

impl Default for Collab {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
