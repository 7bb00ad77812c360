use rendezvous_core::{PeerId, RoomId};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("peer {peer_id} is already a member of room '{room_id}'")]
    AlreadyJoined { peer_id: PeerId, room_id: RoomId },
}

/// Reasons a client frame was dropped. These stay on the relay side and are
/// only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("peer {peer_id} is not a member of room '{room_id}'")]
    NotInRoom { peer_id: PeerId, room_id: RoomId },

    #[error("connection {0} is closed")]
    Closed(PeerId),

    #[error("candidate rate limit exceeded for {0}")]
    RateLimited(PeerId),

    #[error("malformed signal: {0}")]
    Decode(#[from] serde_json::Error),
}
