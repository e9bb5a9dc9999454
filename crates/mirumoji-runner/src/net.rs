use crate::error::NetError;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Source of the host's outbound LAN address.
pub trait LanResolver {
    fn lan_ipv4(&self) -> Result<Ipv4Addr, NetError>;
}

/// Connects a throwaway UDP socket to a public address and reads back the
/// local endpoint the OS routed it through. Connecting a datagram socket
/// sends nothing.
pub struct UdpProbe {
    target: String,
}

impl UdpProbe {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl LanResolver for UdpProbe {
    fn lan_ipv4(&self) -> Result<Ipv4Addr, NetError> {
        let lookup_failed = |source| NetError::LookupFailed {
            probe: self.target.clone(),
            source,
        };

        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).map_err(lookup_failed)?;
        socket.connect(self.target.as_str()).map_err(lookup_failed)?;
        let local = socket.local_addr().map_err(lookup_failed)?;

        match local.ip() {
            IpAddr::V4(ip) => {
                tracing::debug!(%ip, probe = %self.target, "resolved LAN address");
                Ok(ip)
            }
            addr @ IpAddr::V6(_) => Err(NetError::NotIpv4 { addr }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_probe_reports_loopback() {
        let probe = UdpProbe::new("127.0.0.1:9");
        assert_eq!(probe.lan_ipv4().unwrap(), Ipv4Addr::LOCALHOST);
    }

    #[test]
    fn unparsable_target_fails_lookup() {
        let probe = UdpProbe::new("not an address");
        assert!(matches!(
            probe.lan_ipv4(),
            Err(NetError::LookupFailed { .. })
        ));
    }
}
