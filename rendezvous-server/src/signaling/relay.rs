use crate::error::RelayError;
use crate::room::{Member, RoomRegistry};
use crate::signaling::SignalingOutput;
use crate::transport::Connection;
use rendezvous_core::{ClientMessage, NegotiationRole, Payload, PeerId, RoomId, ServerMessage};
use std::sync::Arc;
use tracing::{debug, info};

/// Routes client frames between the members of a room.
///
/// Registry mutation and the recipient snapshot happen under the room lock;
/// delivery happens after it is released. Payloads are never inspected.
#[derive(Clone)]
pub struct Relay {
    registry: RoomRegistry,
    output: Arc<dyn SignalingOutput>,
}

impl Relay {
    pub fn new(registry: RoomRegistry, output: Arc<dyn SignalingOutput>) -> Self {
        Self { registry, output }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub async fn handle(
        &self,
        connection: &mut Connection,
        msg: ClientMessage,
    ) -> Result<(), RelayError> {
        if connection.is_closed() {
            return Err(RelayError::Closed(connection.id()));
        }

        match msg {
            ClientMessage::JoinRoom { room_id, name } => {
                self.join_room(connection, room_id, name).await
            }
            ClientMessage::Offer { room_id, sdp } => self.offer(connection, &room_id, sdp).await,
            ClientMessage::Answer { room_id, sdp } => self.answer(connection, &room_id, sdp).await,
            ClientMessage::IceCandidate { room_id, candidate } => {
                self.candidate(connection, &room_id, candidate).await
            }
            ClientMessage::LeaveRoom { room_id } => self.leave_room(connection, &room_id).await,
        }
    }

    /// Every member already in the room is told about the newcomer and is
    /// the one expected to offer. The newcomer itself gets nothing.
    pub async fn join_room(
        &self,
        connection: &mut Connection,
        room_id: RoomId,
        name: String,
    ) -> Result<(), RelayError> {
        let existing = self.registry.join(connection, room_id.clone(), name.clone())?;
        info!(
            "{} ({}) joined room '{}' with {} peer(s) present",
            name,
            connection.id(),
            room_id,
            existing.len()
        );

        let notice = ServerMessage::PeerJoined {
            peer_id: connection.id(),
            name,
            role: NegotiationRole::Initiator,
        };
        self.fan_out(existing, notice).await;

        Ok(())
    }

    pub async fn offer(
        &self,
        connection: &mut Connection,
        room_id: &RoomId,
        sdp: Payload,
    ) -> Result<(), RelayError> {
        self.forward(connection, room_id, |sender, name| ServerMessage::Offer {
            sender,
            name,
            sdp,
        })
        .await
    }

    pub async fn answer(
        &self,
        connection: &mut Connection,
        room_id: &RoomId,
        sdp: Payload,
    ) -> Result<(), RelayError> {
        self.forward(connection, room_id, |sender, name| ServerMessage::Answer {
            sender,
            name,
            sdp,
        })
        .await
    }

    pub async fn candidate(
        &self,
        connection: &mut Connection,
        room_id: &RoomId,
        candidate: Payload,
    ) -> Result<(), RelayError> {
        if !connection.throttle_mut().try_acquire() {
            return Err(RelayError::RateLimited(connection.id()));
        }

        self.forward(connection, room_id, |sender, name| {
            ServerMessage::IceCandidate {
                sender,
                name,
                candidate,
            }
        })
        .await
    }

    pub async fn leave_room(
        &self,
        connection: &mut Connection,
        room_id: &RoomId,
    ) -> Result<(), RelayError> {
        match connection.room_id() {
            None => {
                debug!("{} sent leave-room while not in a room", connection.id());
                Ok(())
            }
            Some(current) if current != room_id => Err(RelayError::NotInRoom {
                peer_id: connection.id(),
                room_id: room_id.clone(),
            }),
            Some(_) => {
                self.depart(connection).await;
                Ok(())
            }
        }
    }

    /// Transport went away. Safe to call after `leave_room` or twice.
    pub async fn disconnect(&self, connection: &mut Connection) {
        self.depart(connection).await;
        connection.close();
    }

    async fn depart(&self, connection: &mut Connection) {
        let Some(departure) = self.registry.leave(connection) else {
            return;
        };
        info!(
            "{} ({}) left room '{}', {} peer(s) remain",
            departure.member.name,
            departure.member.peer_id,
            departure.room_id,
            departure.remaining.len()
        );

        let notice = ServerMessage::PeerLeft {
            peer_id: departure.member.peer_id,
            name: departure.member.name,
        };
        self.fan_out(departure.remaining, notice).await;
    }

    async fn forward<F>(
        &self,
        connection: &Connection,
        room_id: &RoomId,
        build: F,
    ) -> Result<(), RelayError>
    where
        F: FnOnce(PeerId, String) -> ServerMessage,
    {
        if !connection.is_in(room_id) {
            return Err(RelayError::NotInRoom {
                peer_id: connection.id(),
                room_id: room_id.clone(),
            });
        }

        let recipients = self.registry.members_of(room_id, &connection.id());
        let name = connection.name().unwrap_or_default().to_owned();
        let msg = build(connection.id(), name);

        debug!(
            "Relaying {} from {} to {} peer(s) in '{}'",
            msg.kind(),
            connection.id(),
            recipients.len(),
            room_id
        );
        self.fan_out(recipients, msg).await;

        Ok(())
    }

    async fn fan_out(&self, recipients: Vec<Member>, msg: ServerMessage) {
        for member in recipients {
            self.output.deliver(member.peer_id, msg.clone()).await;
        }
    }
}
