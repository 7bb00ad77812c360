mod member;
mod room_registry;

pub use member::*;
pub use room_registry::*;
