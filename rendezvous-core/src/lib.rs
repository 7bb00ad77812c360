//! Wire model shared by the rendezvous relay and its clients, plus the
//! client-side negotiation coordinator that turns relay events into calls on
//! a local WebRTC engine.

pub mod model;
pub mod negotiation;

pub use model::*;
pub use negotiation::*;
