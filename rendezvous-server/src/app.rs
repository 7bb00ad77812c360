use crate::config::ServerConfig;
use crate::room::RoomRegistry;
use crate::signaling::{Relay, SignalingService, ws_handler};
use anyhow::Context;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub struct AppState {
    pub signaling: SignalingService,
    pub relay: Relay,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let signaling = SignalingService::new(config.ice_servers.clone());
        let relay = Relay::new(RoomRegistry::new(), Arc::new(signaling.clone()));

        Self {
            signaling,
            relay,
            config,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    connections: usize,
    rooms: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        connections: state.signaling.peer_count(),
        rooms: state.relay.registry().room_count(),
    })
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(&state.config.ws_path, get(ws_handler))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Serve on an already bound listener until the future is dropped.
pub async fn serve_on(listener: TcpListener, config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    info!(
        "Signaling relay listening on http://{}",
        listener.local_addr().context("listener has no local address")?
    );
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    serve_on(listener, config).await
}
