//! Egress binding for the wake datagram.
//!
//! Strategies are tried in order: bind to a named device, bind to a
//! local address on the desired link, unbound send over the default
//! route. When every strategy fails the FIRST error is the one
//! reported, so a fallback failure cannot mask the root cause.

use std::fmt;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tracing::warn;

use wakehub_common::config::Config;
use wakehub_common::network::interface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindStrategy {
    /// `SO_BINDTODEVICE` to a named interface.
    Device(String),
    /// Bind to a local IPv4 address on the desired link.
    Address(Ipv4Addr),
    /// No explicit binding; the default route decides.
    Default,
}

impl fmt::Display for BindStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindStrategy::Device(name) => write!(f, "interface {name}"),
            BindStrategy::Address(ip) => write!(f, "source address {ip}"),
            BindStrategy::Default => write!(f, "default route"),
        }
    }
}

/// Builds the ordered strategy chain for the configured egress.
///
/// The address fallback uses the explicit `BROADCAST` bind IP when
/// present, otherwise the first IPv4 address of the named WOL
/// interface. The default route is always the last resort.
pub fn from_config(cfg: &Config) -> Vec<BindStrategy> {
    let mut chain = Vec::new();
    if let Some(name) = cfg.wol_interface.as_deref() {
        chain.push(BindStrategy::Device(name.to_string()));
    }
    let fallback_addr = cfg
        .bind_addr()
        .or_else(|| cfg.wol_interface.as_deref().and_then(interface::ipv4_addr));
    if let Some(addr) = fallback_addr {
        chain.push(BindStrategy::Address(addr));
    }
    chain.push(BindStrategy::Default);
    chain
}

/// Tries each strategy in turn until one delivers the payload, and
/// reports which one did.
pub async fn send(
    strategies: &[BindStrategy],
    payload: &[u8],
    dest: SocketAddrV4,
) -> io::Result<BindStrategy> {
    let mut first_err: Option<io::Error> = None;
    for strategy in strategies {
        match attempt(strategy, payload, dest).await {
            Ok(()) => return Ok(strategy.clone()),
            Err(e) => {
                warn!("wake send via {strategy} failed: {e}");
                first_err.get_or_insert(e);
            }
        }
    }
    Err(first_err.unwrap_or_else(|| io::Error::other("no send strategy available")))
}

async fn attempt(strategy: &BindStrategy, payload: &[u8], dest: SocketAddrV4) -> io::Result<()> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_broadcast(true)?;

    let local: SocketAddr = match strategy {
        BindStrategy::Device(name) => {
            bind_device(&socket, name)?;
            (Ipv4Addr::UNSPECIFIED, 0).into()
        }
        BindStrategy::Address(ip) => (*ip, 0).into(),
        BindStrategy::Default => (Ipv4Addr::UNSPECIFIED, 0).into(),
    };
    socket.bind(&local.into())?;
    socket.set_nonblocking(true)?;

    let socket = UdpSocket::from_std(std::net::UdpSocket::from(socket))?;
    socket.send_to(payload, SocketAddr::V4(dest)).await?;
    Ok(())
}

#[cfg(any(target_os = "linux", target_os = "android", target_os = "fuchsia"))]
fn bind_device(socket: &Socket, name: &str) -> io::Result<()> {
    socket.bind_device(Some(name.as_bytes()))
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "fuchsia")))]
fn bind_device(_socket: &Socket, name: &str) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("device binding to {name} is not supported on this platform"),
    ))
}
