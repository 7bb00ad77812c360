use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rendezvous_core::IceServerConfig;
use rendezvous_server::{DEFAULT_STUN_URL, ServerConfig};
use std::net::{IpAddr, SocketAddr};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rendezvous")]
#[command(version, about = "Room-scoped WebRTC signaling relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay.
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "RENDEZVOUS_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    #[arg(short, long, env = "RENDEZVOUS_PORT", default_value_t = 4000)]
    port: u16,

    /// WebSocket route.
    #[arg(long, env = "RENDEZVOUS_WS_PATH", default_value = "/ws")]
    path: String,

    /// STUN servers advertised to clients.
    #[arg(
        long = "stun",
        env = "RENDEZVOUS_STUN_URLS",
        value_delimiter = ',',
        default_value = DEFAULT_STUN_URL
    )]
    stun_urls: Vec<String>,

    #[arg(long, env = "TURN_URL")]
    turn_url: Option<String>,

    #[arg(long, env = "TURN_USERNAME", requires = "turn_url")]
    turn_username: Option<String>,

    #[arg(long, env = "TURN_CREDENTIAL", requires = "turn_url")]
    turn_credential: Option<String>,

    /// Per-connection ICE candidate budget; 0 disables it.
    #[arg(long, env = "RENDEZVOUS_MAX_CANDIDATES", default_value_t = 50)]
    max_candidates_per_second: u32,

    /// Used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl ServeArgs {
    fn into_config(self) -> Result<ServerConfig> {
        if !self.path.starts_with('/') {
            anyhow::bail!("WebSocket path must start with '/': {}", self.path);
        }

        let mut ice_servers: Vec<IceServerConfig> = self
            .stun_urls
            .into_iter()
            .filter(|url| !url.is_empty())
            .map(IceServerConfig::stun)
            .collect();

        if let Some(url) = self.turn_url {
            ice_servers.push(IceServerConfig {
                urls: vec![url],
                username: self.turn_username,
                credential: self.turn_credential,
            });
        }

        Ok(ServerConfig {
            addr: SocketAddr::new(self.host, self.port),
            ws_path: self.path,
            ice_servers,
            max_candidates_per_second: self.max_candidates_per_second,
        })
    }
}

fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Invalid log level")?;

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            init_tracing(&args.log_level)?;
            let config = args.into_config()?;

            println!("{}", "📡 Starting rendezvous relay...".green().bold());
            println!("   🔌 WebSocket: ws://{}{}", config.addr, config.ws_path);
            info!("Advertising {} ICE server(s)", config.ice_servers.len());

            rendezvous_server::serve(config).await?;
        }
    }

    Ok(())
}
