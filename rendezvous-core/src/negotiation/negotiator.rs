use crate::model::{ClientMessage, NegotiationRole, Payload, PeerId, RoomId, ServerMessage};
use crate::negotiation::{NegotiationEngine, NegotiationError};
use tracing::{debug, info, warn};

/// Client-observable negotiation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    /// Not in a room.
    Idle,
    /// In a room, no exchange in flight.
    Joined,
    /// Our offer went out; waiting for the remote answer.
    AwaitingAnswer,
    /// Descriptions are set on both sides.
    Stable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePeer {
    pub peer_id: PeerId,
    pub name: String,
}

/// Drives one side of a two-party exchange over the relay.
///
/// Feed every [`ServerMessage`] into [`Negotiator::handle`] and send back
/// whatever [`ClientMessage`] it returns. The member notified by
/// `peer-joined` offers, the newcomer answers. If both sides still end up
/// offering at once, the side with the lower peer id yields and answers the
/// remote offer; the other side drops the incoming one.
pub struct Negotiator<E> {
    engine: E,
    local_id: Option<PeerId>,
    room_id: Option<RoomId>,
    remote: Option<RemotePeer>,
    state: NegotiationState,
}

impl<E: NegotiationEngine> Negotiator<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            local_id: None,
            room_id: None,
            remote: None,
            state: NegotiationState::Idle,
        }
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn local_id(&self) -> Option<PeerId> {
        self.local_id
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    pub fn remote_peer(&self) -> Option<&RemotePeer> {
        self.remote.as_ref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn join(
        &mut self,
        room_id: RoomId,
        name: impl Into<String>,
    ) -> Result<ClientMessage, NegotiationError> {
        if let Some(current) = &self.room_id {
            return Err(NegotiationError::AlreadyJoined(current.to_string()));
        }

        self.room_id = Some(room_id.clone());
        self.state = NegotiationState::Joined;

        Ok(ClientMessage::JoinRoom {
            room_id,
            name: name.into(),
        })
    }

    /// Leave the current room, if any.
    pub fn leave(&mut self) -> Option<ClientMessage> {
        let room_id = self.room_id.take()?;
        self.remote = None;
        self.state = NegotiationState::Idle;

        Some(ClientMessage::LeaveRoom { room_id })
    }

    /// Wrap a locally gathered candidate for the relay.
    pub fn local_candidate(&self, candidate: Payload) -> Option<ClientMessage> {
        let room_id = self.room_id.clone()?;
        Some(ClientMessage::IceCandidate { room_id, candidate })
    }

    pub async fn handle(
        &mut self,
        msg: ServerMessage,
    ) -> Result<Option<ClientMessage>, NegotiationError> {
        match msg {
            ServerMessage::Welcome { peer_id, .. } => {
                debug!("Relay assigned id {}", peer_id);
                self.local_id = Some(peer_id);
                Ok(None)
            }

            ServerMessage::PeerJoined {
                peer_id,
                name,
                role,
            } => {
                let room_id = self.room_id.clone().ok_or(NegotiationError::NotJoined)?;
                info!("{} ({}) joined '{}', we are {:?}", name, peer_id, room_id, role);

                self.remote = Some(RemotePeer { peer_id, name });

                if role != NegotiationRole::Initiator {
                    return Ok(None);
                }

                let sdp = self
                    .engine
                    .create_offer()
                    .await
                    .map_err(NegotiationError::Engine)?;
                self.state = NegotiationState::AwaitingAnswer;

                Ok(Some(ClientMessage::Offer { room_id, sdp }))
            }

            ServerMessage::Offer { sender, name, sdp } => {
                let room_id = self.room_id.clone().ok_or(NegotiationError::NotJoined)?;

                let glare = self.state == NegotiationState::AwaitingAnswer;
                if glare && !self.is_polite_towards(&sender) {
                    warn!("Offer collision with {}; keeping our own offer", sender);
                    return Ok(None);
                }

                self.engine
                    .set_remote_description(sdp)
                    .await
                    .map_err(NegotiationError::Engine)?;
                let answer = self
                    .engine
                    .create_answer()
                    .await
                    .map_err(NegotiationError::Engine)?;

                self.remote = Some(RemotePeer {
                    peer_id: sender,
                    name,
                });
                self.state = NegotiationState::Stable;

                Ok(Some(ClientMessage::Answer {
                    room_id,
                    sdp: answer,
                }))
            }

            ServerMessage::Answer { sender, sdp, .. } => {
                if self.state != NegotiationState::AwaitingAnswer {
                    warn!("Ignoring unsolicited answer from {}", sender);
                    return Ok(None);
                }

                self.engine
                    .set_remote_description(sdp)
                    .await
                    .map_err(NegotiationError::Engine)?;
                self.state = NegotiationState::Stable;

                Ok(None)
            }

            ServerMessage::IceCandidate {
                sender, candidate, ..
            } => {
                if self.room_id.is_none() {
                    return Err(NegotiationError::NotJoined);
                }
                debug!("Remote candidate from {}", sender);

                self.engine
                    .add_candidate(candidate)
                    .await
                    .map_err(NegotiationError::Engine)?;

                Ok(None)
            }

            ServerMessage::PeerLeft { peer_id, name } => {
                let was_remote = self
                    .remote
                    .as_ref()
                    .is_some_and(|remote| remote.peer_id == peer_id);

                if was_remote {
                    info!("{} ({}) left; back to waiting", name, peer_id);
                    self.remote = None;
                    self.state = NegotiationState::Joined;
                }

                Ok(None)
            }
        }
    }

    // Without a relay-assigned id we cannot compare, so yield.
    fn is_polite_towards(&self, remote: &PeerId) -> bool {
        self.local_id.is_none_or(|local| local < *remote)
    }
}
