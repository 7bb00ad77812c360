mod candidate_throttle;
mod connection;

pub use candidate_throttle::*;
pub use connection::*;
