use async_trait::async_trait;
use rendezvous_core::{PeerId, ServerMessage};

/// Outbound side of the relay: whatever owns the client sockets.
///
/// Implementations must not block on the network. A failed delivery is the
/// implementation's to log; it must not affect deliveries to other peers.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn deliver(&self, peer_id: PeerId, msg: ServerMessage);
}
