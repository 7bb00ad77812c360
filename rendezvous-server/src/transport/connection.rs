use crate::transport::CandidateThrottle;
use rendezvous_core::{PeerId, RoomId};

/// Relay-side state of one client connection.
///
/// Owned by the task serving the socket and lent by `&mut` to every relay
/// operation. The registry only keeps the id and display name.
#[derive(Debug)]
pub struct Connection {
    id: PeerId,
    name: Option<String>,
    room_id: Option<RoomId>,
    closed: bool,
    throttle: CandidateThrottle,
}

impl Connection {
    pub fn new(id: PeerId, max_candidates_per_second: u32) -> Self {
        Self {
            id,
            name: None,
            room_id: None,
            closed: false,
            throttle: CandidateThrottle::new(max_candidates_per_second),
        }
    }

    pub fn id(&self) -> PeerId {
        self.id
    }

    /// Display name given at the last join.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    pub fn is_in(&self, room_id: &RoomId) -> bool {
        self.room_id.as_ref() == Some(room_id)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn enter(&mut self, room_id: RoomId, name: String) {
        self.room_id = Some(room_id);
        self.name = Some(name);
    }

    pub(crate) fn exit(&mut self) -> Option<RoomId> {
        self.room_id.take()
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }

    pub(crate) fn throttle_mut(&mut self) -> &mut CandidateThrottle {
        &mut self.throttle
    }
}
