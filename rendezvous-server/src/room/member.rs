use rendezvous_core::{PeerId, RoomId};

/// Registry entry for a connection inside a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub peer_id: PeerId,
    pub name: String,
}

/// Outcome of a successful leave, used for `peer-left` fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room_id: RoomId,
    pub member: Member,
    pub remaining: Vec<Member>,
}
