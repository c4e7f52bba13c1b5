mod id;
mod random;

pub use id::*;
pub use random::*;
