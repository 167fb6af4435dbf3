use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wakehub_common::config::{Config, DEFAULT_PORT};
use wakehub_server::{AppState, routes};

/// Wake-on-LAN control service: reachability checks over `/status` and
/// magic-packet sends over `/start` for a single managed host.
#[derive(Parser, Debug)]
#[command(name = "wakehub", version, about)]
struct Args {
    /// MAC address of the host to wake
    #[arg(long, env = "PC_MAC")]
    mac: Option<String>,

    /// Target host IP on the WOL network; derives the broadcast address
    #[arg(long, env = "PC_IP")]
    target_ip: Option<String>,

    /// Preferred address for the reachability probe
    #[arg(long, env = "PC_STATUS_IP")]
    status_ip: Option<String>,

    /// Local source IP on the WOL network, for the bind fallback
    #[arg(long, env = "BROADCAST")]
    bind_ip: Option<String>,

    /// Named egress interface for the magic packet
    #[arg(long, env = "WOL_INTERFACE")]
    wol_interface: Option<String>,

    /// Named egress interface for the probe
    #[arg(long, env = "STATUS_INTERFACE")]
    status_interface: Option<String>,

    /// HTTP listen port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            mac: args.mac,
            target_ip: args.target_ip,
            status_ip: args.status_ip,
            bind_ip: args.bind_ip,
            wol_interface: args.wol_interface,
            status_interface: args.status_interface,
            port: args.port,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config: Config = Args::parse().into();
    let addr = format!("0.0.0.0:{}", config.port);

    let app = routes::router(AppState::new(config));
    let listener = TcpListener::bind(&addr).await?;
    info!("wakehub listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
    }
}
