use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use tracing::debug;

/// Looks up a network interface by its OS name (e.g. `eth0`).
pub fn find_by_name(name: &str) -> Option<NetworkInterface> {
    let found = datalink::interfaces().into_iter().find(|i| i.name == name);
    if found.is_none() {
        debug!("no interface named {name}");
    }
    found
}

/// First IPv4 address assigned to the named interface, used as the bind
/// address when device-level binding is unavailable.
pub fn ipv4_addr(name: &str) -> Option<Ipv4Addr> {
    find_by_name(name)?.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) => Some(v4.ip()),
        IpNetwork::V6(_) => None,
    })
}
