use crate::error::RegistryError;
use crate::room::{Departure, Member};
use crate::transport::Connection;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rendezvous_core::{PeerId, RoomId};
use std::sync::Arc;
use tracing::{debug, info};

/// Room id -> members in join order.
///
/// Each room entry is only touched under its shard lock, so a join and a
/// leave on the same room never interleave while unrelated rooms proceed in
/// parallel. A room exists exactly as long as it has members: the entry is
/// created by the first join and removed by the leave that empties it.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    rooms: Arc<DashMap<RoomId, Vec<Member>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `connection` to `room_id` and return the members that were
    /// already there, oldest first.
    pub fn join(
        &self,
        connection: &mut Connection,
        room_id: RoomId,
        name: String,
    ) -> Result<Vec<Member>, RegistryError> {
        if let Some(current) = connection.room_id() {
            return Err(RegistryError::AlreadyJoined {
                peer_id: connection.id(),
                room_id: current.clone(),
            });
        }

        let existing = {
            let mut members = self.rooms.entry(room_id.clone()).or_default();
            if members.is_empty() {
                info!("Creating room '{}'", room_id);
            }
            let existing = members.clone();
            members.push(Member {
                peer_id: connection.id(),
                name: name.clone(),
            });
            existing
        };

        connection.enter(room_id, name);
        Ok(existing)
    }

    /// Remove `connection` from its room. Returns `None` when it was not in
    /// one, so repeated calls are harmless.
    pub fn leave(&self, connection: &mut Connection) -> Option<Departure> {
        let room_id = connection.exit()?;
        let peer_id = connection.id();

        let remaining = match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().retain(|member| member.peer_id != peer_id);
                if entry.get().is_empty() {
                    entry.remove();
                    info!("Room '{}' is empty, dropping it", room_id);
                    Vec::new()
                } else {
                    entry.get().clone()
                }
            }
            Entry::Vacant(_) => {
                debug!("Room '{}' already gone when {} left", room_id, peer_id);
                Vec::new()
            }
        };

        Some(Departure {
            room_id,
            member: Member {
                peer_id,
                name: connection.name().unwrap_or_default().to_owned(),
            },
            remaining,
        })
    }

    /// Snapshot of `room_id`'s members in join order, without `excluding`.
    pub fn members_of(&self, room_id: &RoomId, excluding: &PeerId) -> Vec<Member> {
        self.rooms
            .get(room_id)
            .map(|members| {
                members
                    .iter()
                    .filter(|member| member.peer_id != *excluding)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains(&self, room_id: &RoomId, peer_id: &PeerId) -> bool {
        self.rooms
            .get(room_id)
            .is_some_and(|members| members.iter().any(|member| member.peer_id == *peer_id))
    }

    pub fn member_count(&self, room_id: &RoomId) -> usize {
        self.rooms.get(room_id).map_or(0, |members| members.len())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn list_rooms(&self) -> Vec<RoomId> {
        self.rooms.iter().map(|entry| entry.key().clone()).collect()
    }
}
