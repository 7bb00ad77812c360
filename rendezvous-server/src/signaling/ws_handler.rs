use crate::AppState;
use crate::error::RelayError;
use crate::transport::Connection;
use axum::extract::State;
use axum::extract::WebSocketUpgrade;
use axum::extract::ws::{Message, WebSocket};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use rendezvous_core::{ClientMessage, PeerId, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let peer_id = PeerId::new();
    info!("New WebSocket connection: {}", peer_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_peer(peer_id, tx);
    state.signaling.send_signal(
        peer_id,
        ServerMessage::Welcome {
            peer_id,
            ice_servers: state.signaling.get_ice_servers(),
        },
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    // The read loop stays on this task so the connection state is still here
    // for cleanup whichever side of the socket fails first.
    let mut connection = Connection::new(peer_id, state.config.max_candidates_per_second);

    loop {
        tokio::select! {
            frame = receiver.next() => {
                let Some(Ok(msg)) = frame else {
                    break;
                };

                match msg {
                    Message::Text(text) => {
                        if let Err(e) = dispatch(&state, &mut connection, &text).await {
                            warn!("Dropped frame from {}: {}", peer_id, e);
                        }
                    }
                    Message::Close(_) => break,
                    other => debug!("Ignoring non-text frame from {}: {:?}", peer_id, other),
                }
            }

            _ = &mut send_task => break,
        }
    }

    send_task.abort();

    state.relay.disconnect(&mut connection).await;
    state.signaling.remove_peer(&peer_id);
    info!("WebSocket disconnected: {}", peer_id);
}

async fn dispatch(
    state: &AppState,
    connection: &mut Connection,
    text: &str,
) -> Result<(), RelayError> {
    let signal: ClientMessage = serde_json::from_str(text)?;
    debug!("{} from {}", signal.kind(), connection.id());

    state.relay.handle(connection, signal).await
}
