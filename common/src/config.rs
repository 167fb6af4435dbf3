use std::net::{IpAddr, Ipv4Addr};

/// HTTP listen port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 13579;

/// Immutable service configuration, loaded once at startup and passed
/// explicitly into the prober and the packet sender.
///
/// Address and MAC fields are kept as the raw strings they were loaded
/// with and parsed at the point of use, so a malformed value degrades
/// the affected endpoint instead of the whole process.
#[derive(Debug, Clone)]
pub struct Config {
    /// MAC address of the host to wake (`PC_MAC`).
    pub mac: Option<String>,
    /// Target host IP on the WOL network (`PC_IP`); derives the
    /// broadcast address and doubles as the status fallback.
    pub target_ip: Option<String>,
    /// Preferred address for the reachability probe (`PC_STATUS_IP`).
    pub status_ip: Option<String>,
    /// Local source IP on the WOL network (`BROADCAST`).
    pub bind_ip: Option<String>,
    /// Named egress interface for the magic packet (`WOL_INTERFACE`).
    pub wol_interface: Option<String>,
    /// Named egress interface for the probe (`STATUS_INTERFACE`).
    pub status_interface: Option<String>,
    /// HTTP listen port (`PORT`).
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mac: None,
            target_ip: None,
            status_ip: None,
            bind_ip: None,
            wol_interface: None,
            status_interface: None,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Address the reachability probe should target: the status IP when
    /// set, otherwise the WOL target IP.
    pub fn status_target(&self) -> Option<&str> {
        self.status_ip.as_deref().or(self.target_ip.as_deref())
    }

    /// [`Config::status_target`] parsed as an IP address. A value that
    /// does not parse resolves to `None` and the probe reports offline.
    pub fn status_addr(&self) -> Option<IpAddr> {
        self.status_target().and_then(|s| s.parse().ok())
    }

    /// `bind_ip` parsed as an IPv4 address.
    pub fn bind_addr(&self) -> Option<Ipv4Addr> {
        self.bind_ip.as_deref().and_then(|s| s.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_target_prefers_the_status_ip() {
        let config = Config {
            target_ip: Some("192.168.100.1".to_string()),
            status_ip: Some("192.168.0.153".to_string()),
            ..Config::default()
        };
        assert_eq!(config.status_target(), Some("192.168.0.153"));
    }

    #[test]
    fn status_target_falls_back_to_the_target_ip() {
        let config = Config {
            target_ip: Some("192.168.100.1".to_string()),
            ..Config::default()
        };
        assert_eq!(config.status_target(), Some("192.168.100.1"));
        assert_eq!(
            config.status_addr(),
            Some(IpAddr::V4(Ipv4Addr::new(192, 168, 100, 1)))
        );
    }

    #[test]
    fn unconfigured_status_target_is_none() {
        assert_eq!(Config::default().status_target(), None);
        assert_eq!(Config::default().status_addr(), None);
    }

    #[test]
    fn unparseable_addresses_resolve_to_none() {
        let config = Config {
            status_ip: Some("not-an-address".to_string()),
            bind_ip: Some("192.168.100".to_string()),
            ..Config::default()
        };
        assert_eq!(config.status_addr(), None);
        assert_eq!(config.bind_addr(), None);
    }

    #[test]
    fn listen_port_defaults_to_13579() {
        assert_eq!(Config::default().port, DEFAULT_PORT);
    }
}
