//! Wake-on-LAN magic packet construction and transmission.
//!
//! The sender is fire-and-forget: the WOL protocol defines no reply, so
//! success means the datagram was handed to the network stack. On a
//! multi-homed host the packet has to leave through the link that faces
//! the sleeping machine, which is what the [`strategy`] chain is for.

use std::net::{Ipv4Addr, SocketAddrV4};

use tracing::info;

use wakehub_common::config::Config;
use wakehub_common::error::WakeError;
use wakehub_common::network::mac::MacAddress;

pub mod strategy;

/// Conventional WOL destination port.
pub const WOL_PORT: u16 = 9;

const PAYLOAD_LEN: usize = 102;

/// The fixed 102-byte wake payload: six `0xFF` synchronization bytes
/// followed by the target MAC repeated sixteen times.
pub struct MagicPacket([u8; PAYLOAD_LEN]);

impl MagicPacket {
    pub fn new(mac: MacAddress) -> Self {
        let mut data = [0xFF; PAYLOAD_LEN];
        for repeat in data[6..].chunks_exact_mut(6) {
            repeat.copy_from_slice(&mac.octets());
        }
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Destination broadcast address for the wake datagram.
///
/// A configured dotted-quad target keeps its first three octets with
/// the host part set to 255 (the target network is assumed to be a
/// /24); an absent or malformed target falls back to the global
/// broadcast address.
pub fn derive_broadcast(target_ip: Option<&str>) -> Ipv4Addr {
    match target_ip.and_then(|s| s.parse::<Ipv4Addr>().ok()) {
        Some(ip) => {
            let [a, b, c, _] = ip.octets();
            Ipv4Addr::new(a, b, c, 255)
        }
        None => Ipv4Addr::BROADCAST,
    }
}

/// Sends the magic packet for the configured host to the derived
/// broadcast address on port 9.
pub async fn wake(cfg: &Config) -> Result<(), WakeError> {
    let broadcast = derive_broadcast(cfg.target_ip.as_deref());
    wake_to(cfg, SocketAddrV4::new(broadcast, WOL_PORT)).await
}

/// Sends the magic packet to an explicit destination, which takes
/// precedence over the broadcast derivation.
pub async fn wake_to(cfg: &Config, dest: SocketAddrV4) -> Result<(), WakeError> {
    let raw = cfg.mac.as_deref().ok_or(WakeError::MacNotConfigured)?;
    let mac: MacAddress = raw.parse()?;
    let packet = MagicPacket::new(mac);

    let chain = strategy::from_config(cfg);
    let used = strategy::send(&chain, packet.as_bytes(), dest).await?;
    info!("magic packet for {mac} sent to {dest} via {used}");
    Ok(())
}
