mod payload;
mod peer;
mod role;
mod room;
mod signaling;

pub use payload::Payload;
pub use peer::PeerId;
pub use role::NegotiationRole;
pub use room::RoomId;
pub use signaling::{ClientMessage, IceServerConfig, ServerMessage};
