mod engine;
mod error;
mod negotiator;

pub use engine::*;
pub use error::*;
pub use negotiator::*;
