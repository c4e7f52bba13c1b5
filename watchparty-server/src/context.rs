use std::sync::Arc;

use watchparty_collab::Collab;

#[derive(Clone)]
pub struct ServerContext {
    pub collab: Arc<Collab>,
}
