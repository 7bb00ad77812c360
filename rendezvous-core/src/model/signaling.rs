use crate::model::payload::Payload;
use crate::model::peer::PeerId;
use crate::model::role::NegotiationRole;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// Frames a client sends to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinRoom { room_id: RoomId, name: String },
    Offer { room_id: RoomId, sdp: Payload },
    Answer { room_id: RoomId, sdp: Payload },
    IceCandidate { room_id: RoomId, candidate: Payload },
    LeaveRoom { room_id: RoomId },
}

impl ClientMessage {
    pub fn room_id(&self) -> &RoomId {
        match self {
            ClientMessage::JoinRoom { room_id, .. }
            | ClientMessage::Offer { room_id, .. }
            | ClientMessage::Answer { room_id, .. }
            | ClientMessage::IceCandidate { room_id, .. }
            | ClientMessage::LeaveRoom { room_id } => room_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::JoinRoom { .. } => "join-room",
            ClientMessage::Offer { .. } => "offer",
            ClientMessage::Answer { .. } => "answer",
            ClientMessage::IceCandidate { .. } => "ice-candidate",
            ClientMessage::LeaveRoom { .. } => "leave-room",
        }
    }
}

/// Frames the relay sends to a client.
///
/// Forwarded negotiation messages carry the sender's id and display name
/// next to the untouched payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerMessage {
    Welcome {
        peer_id: PeerId,
        ice_servers: Vec<IceServerConfig>,
    },
    PeerJoined {
        peer_id: PeerId,
        name: String,
        role: NegotiationRole,
    },
    Offer {
        sender: PeerId,
        name: String,
        sdp: Payload,
    },
    Answer {
        sender: PeerId,
        name: String,
        sdp: Payload,
    },
    IceCandidate {
        sender: PeerId,
        name: String,
        candidate: Payload,
    },
    PeerLeft {
        peer_id: PeerId,
        name: String,
    },
}

impl ServerMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::Welcome { .. } => "welcome",
            ServerMessage::PeerJoined { .. } => "peer-joined",
            ServerMessage::Offer { .. } => "offer",
            ServerMessage::Answer { .. } => "answer",
            ServerMessage::IceCandidate { .. } => "ice-candidate",
            ServerMessage::PeerLeft { .. } => "peer-left",
        }
    }
}
