/// The configuration of the collab system
#[derive(Debug, Clone)]
pub struct Config {
    /// How many characters a generated room id has
    pub room_id_length: usize,
    /// How many chat messages a room keeps before dropping the oldest
    pub chat_history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // 36^8 ids is plenty for a handful of concurrent rooms
            room_id_length: 8,
            chat_history_limit: 100,
        }
    }
}
