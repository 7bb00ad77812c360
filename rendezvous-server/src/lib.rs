//! Room-scoped WebRTC signaling relay.
//!
//! Clients connect over a WebSocket, join a named room and exchange opaque
//! offer/answer/candidate messages with the other members. The relay tracks
//! membership, tells existing members when someone joins or leaves, and
//! never looks at media or negotiation payloads.

mod app;
mod config;
mod error;
mod room;
mod signaling;
mod transport;

pub use app::*;
pub use config::*;
pub use error::*;
pub use room::*;
pub use signaling::*;
pub use transport::*;
