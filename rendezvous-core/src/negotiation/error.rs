use crate::negotiation::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum NegotiationError {
    #[error("received a negotiation event before joining a room")]
    NotJoined,

    #[error("already joined room '{0}'")]
    AlreadyJoined(String),

    #[error("negotiation engine failed: {0}")]
    Engine(#[source] EngineError),
}
