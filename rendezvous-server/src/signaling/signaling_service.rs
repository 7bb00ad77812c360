use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use rendezvous_core::{IceServerConfig, PeerId, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    peers: DashMap<PeerId, mpsc::UnboundedSender<Message>>,
    ice_servers: Vec<IceServerConfig>,
}

/// Outbound queues of every live socket.
///
/// Each socket task drains its own queue, so pushing here never waits on a
/// slow client and per-recipient order is the order of `send_signal` calls.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
                ice_servers,
            }),
        }
    }

    pub fn get_ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(peer_id, tx);
    }

    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.inner.peers.remove(peer_id);
    }

    pub fn peer_count(&self) -> usize {
        self.inner.peers.len()
    }

    pub fn send_signal(&self, peer_id: PeerId, msg: ServerMessage) {
        let json = match serde_json::to_string(&msg) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize signal message: {}", e);
                return;
            }
        };

        let Some(peer) = self.inner.peers.get(&peer_id).map(|tx| tx.value().clone()) else {
            warn!("Attempted to send signal to disconnected peer {}", peer_id);
            return;
        };

        if let Err(e) = peer.send(Message::Text(json.into())) {
            error!("Failed to send WS message to {}: {:?}", peer_id, e);
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn deliver(&self, peer_id: PeerId, msg: ServerMessage) {
        self.send_signal(peer_id, msg);
    }
}
