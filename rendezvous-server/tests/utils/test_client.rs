use anyhow::{Context, Result, bail};
use futures::{SinkExt, StreamExt};
use rendezvous_core::{ClientMessage, IceServerConfig, PeerId, ServerMessage};
use rendezvous_server::ServerConfig;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// Timeout for a single expected message (ms).
pub const RECV_TIMEOUT_MS: u64 = 2000;

/// How long to listen before concluding nothing else is coming (ms).
pub const SILENCE_MS: u64 = 200;

/// Start a relay on an ephemeral port. Returns its address.
pub async fn spawn_server(config: ServerConfig) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = rendezvous_server::serve_on(listener, config).await {
            tracing::error!("[TestServer] stopped: {:?}", e);
        }
    });

    Ok(addr)
}

/// Plain HTTP GET, returning the raw response.
pub async fn http_get(addr: SocketAddr, path: &str) -> Result<String> {
    let mut stream = TcpStream::connect(addr).await?;
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, addr
    );
    stream.write_all(request.as_bytes()).await?;

    let mut response = String::new();
    stream.read_to_string(&mut response).await?;
    Ok(response)
}

/// WebSocket client speaking the relay protocol.
pub struct TestClient {
    /// Id assigned by the relay in `welcome`.
    pub peer_id: PeerId,
    pub ice_servers: Vec<IceServerConfig>,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect and consume the `welcome` frame.
    pub async fn connect(addr: SocketAddr, path: &str) -> Result<Self> {
        let url = format!("ws://{}{}", addr, path);
        let (stream, _) = connect_async(url.as_str())
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        let mut client = Self {
            peer_id: PeerId::new(),
            ice_servers: Vec::new(),
            stream,
        };

        match client.recv().await? {
            ServerMessage::Welcome {
                peer_id,
                ice_servers,
            } => {
                client.peer_id = peer_id;
                client.ice_servers = ice_servers;
            }
            other => bail!("Expected welcome, got {:?}", other),
        }

        Ok(client)
    }

    pub async fn send(&mut self, msg: &ClientMessage) -> Result<()> {
        let json = serde_json::to_string(msg)?;
        self.send_raw(&json).await
    }

    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.stream
            .send(Message::text(text.to_owned()))
            .await
            .context("Failed to send frame")
    }

    pub async fn send_binary(&mut self, data: &[u8]) -> Result<()> {
        self.stream
            .send(Message::binary(data.to_vec()))
            .await
            .context("Failed to send frame")
    }

    /// Next relay message, skipping control frames.
    pub async fn recv(&mut self) -> Result<ServerMessage> {
        let deadline = Duration::from_millis(RECV_TIMEOUT_MS);

        loop {
            let frame = tokio::time::timeout(deadline, self.stream.next())
                .await
                .context("Timeout waiting for relay message")?;

            match frame {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str(text.as_str()).context("Bad relay frame");
                }
                Some(Ok(Message::Close(_))) | None => bail!("Connection closed"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Fails if any relay message arrives within [`SILENCE_MS`].
    pub async fn expect_silence(&mut self) -> Result<()> {
        let window = Duration::from_millis(SILENCE_MS);

        match tokio::time::timeout(window, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(Message::Text(text)))) => bail!("Unexpected message: {}", text.as_str()),
            Ok(other) => bail!("Unexpected frame: {:?}", other),
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
