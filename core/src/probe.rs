//! Host reachability via a single ICMP echo request.

use std::net::IpAddr;
use std::time::Duration;

use surge_ping::{Client, Config as PingConfig, PingIdentifier, PingSequence};
use tracing::debug;

use wakehub_common::config::Config;

/// Hard ceiling on the echo round trip; an unreachable host reports
/// offline after at most this long.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// A one-shot liveness check against the configured status address.
///
/// The probe never fails: an unconfigured target, a socket error (raw
/// ICMP sockets may need elevated privileges), a bind error and a
/// timeout all report as offline.
#[derive(Debug, Clone)]
pub struct Prober {
    target: Option<IpAddr>,
    interface: Option<String>,
}

impl Prober {
    /// Resolves the probe target from configuration: the status IP when
    /// set, otherwise the WOL target IP.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            target: cfg.status_addr(),
            interface: cfg.status_interface.clone(),
        }
    }

    pub fn target(&self) -> Option<IpAddr> {
        self.target
    }

    /// Sends one echo request and waits up to [`PROBE_TIMEOUT`] for the
    /// reply.
    pub async fn check(&self) -> bool {
        let Some(addr) = self.target else {
            return false;
        };

        let mut config = PingConfig::builder();
        if let Some(name) = self.interface.as_deref() {
            config = config.interface(name);
        }
        let client = match Client::new(&config.build()) {
            Ok(client) => client,
            Err(e) => {
                debug!("icmp client unavailable: {e}");
                return false;
            }
        };

        let mut pinger = client.pinger(addr, PingIdentifier(rand::random())).await;
        pinger.timeout(PROBE_TIMEOUT);

        match pinger.ping(PingSequence(0), &[]).await {
            Ok(_) => true,
            Err(e) => {
                debug!("echo to {addr} failed: {e}");
                false
            }
        }
    }
}
