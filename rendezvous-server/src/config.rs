use rendezvous_core::IceServerConfig;
use std::net::SocketAddr;

pub const DEFAULT_STUN_URL: &str = "stun:stun.l.google.com:19302";

/// Runtime settings of the relay.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Route the WebSocket endpoint is mounted on.
    pub ws_path: String,
    /// Handed to every client in `welcome`.
    pub ice_servers: Vec<IceServerConfig>,
    /// 0 disables the limit.
    pub max_candidates_per_second: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 4000)),
            ws_path: "/ws".to_owned(),
            ice_servers: vec![IceServerConfig::stun(DEFAULT_STUN_URL)],
            max_candidates_per_second: 50,
        }
    }
}
