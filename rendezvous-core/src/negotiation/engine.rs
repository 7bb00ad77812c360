use crate::model::Payload;
use async_trait::async_trait;

pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The local media/negotiation stack (a browser `RTCPeerConnection` or a
/// native equivalent).
///
/// Descriptions and candidates are produced and consumed as opaque
/// [`Payload`]s. Candidate buffering until a remote description is set is the
/// engine's responsibility.
#[async_trait]
pub trait NegotiationEngine: Send {
    /// Produce a local offer and apply it as the local description.
    async fn create_offer(&mut self) -> Result<Payload, EngineError>;

    /// Produce a local answer to the current remote offer and apply it.
    async fn create_answer(&mut self) -> Result<Payload, EngineError>;

    async fn set_remote_description(&mut self, description: Payload) -> Result<(), EngineError>;

    async fn add_candidate(&mut self, candidate: Payload) -> Result<(), EngineError>;
}
