//! TCP reachability probing.
//!
//! A probe opens a connection to `ip:port`, measures how long the handshake
//! takes and closes it again. [`Prober`] picks the backend from configuration;
//! both backends honour the same deadline and failure classification.

mod error;
mod nmap;
mod tcp;
mod types;

use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

pub use error::ProbeError;
pub use nmap::NmapProbe;
pub use tcp::{Connector, TcpConnector, TcpProbe};
pub use types::{ProbeBackend, ProbeResult};

/// Anything that can tell whether `ip:port` accepts connections within a deadline.
pub trait Probe: Send + Sync {
    fn probe(
        &self,
        ip: IpAddr,
        port: u16,
        timeout: Duration,
    ) -> impl Future<Output = Result<ProbeResult, ProbeError>> + Send;
}

/// Backend selected by [`ProbeBackend`].
#[derive(Debug, Clone)]
pub enum Prober {
    Tcp(TcpProbe),
    Nmap(NmapProbe),
}

impl Prober {
    pub fn new(backend: ProbeBackend) -> Self {
        match backend {
            ProbeBackend::Tcp => Self::Tcp(TcpProbe::new()),
            ProbeBackend::Nmap => Self::Nmap(NmapProbe::new()),
        }
    }

    pub fn backend(&self) -> ProbeBackend {
        match self {
            Self::Tcp(_) => ProbeBackend::Tcp,
            Self::Nmap(_) => ProbeBackend::Nmap,
        }
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new(ProbeBackend::default())
    }
}

impl Probe for Prober {
    async fn probe(
        &self,
        ip: IpAddr,
        port: u16,
        timeout: Duration,
    ) -> Result<ProbeResult, ProbeError> {
        match self {
            Self::Tcp(inner) => inner.probe(ip, port, timeout).await,
            Self::Nmap(inner) => inner.probe(ip, port, timeout).await,
        }
    }
}

/// Time a plain TCP handshake to `ip:port`, giving up after `timeout_ms`.
///
/// `ip` must be an address literal; anything else fails with
/// [`ProbeError::InvalidAddress`] without touching the network.
pub async fn probe(ip: &str, port: u16, timeout_ms: u64) -> Result<ProbeResult, ProbeError> {
    let addr: IpAddr = ip.trim().parse().map_err(|_| ProbeError::InvalidAddress {
        input: ip.to_string(),
    })?;
    TcpProbe::new()
        .probe(addr, port, Duration::from_millis(timeout_ms))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn probe_parses_address_literal() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let port = listener.local_addr().expect("addr").port();

        let result = probe("127.0.0.1", port, 5_000).await.expect("probe succeeds");
        assert!(result.duration_millis < 5_000);
    }

    #[tokio::test]
    async fn hostname_is_not_an_address() {
        let err = probe("mail.example.com", 25, 5_000)
            .await
            .expect_err("hostnames are rejected");
        assert!(matches!(err, ProbeError::InvalidAddress { .. }));
        assert_eq!(err.kind(), FailureKind::ConnectionError);
    }

    #[test]
    fn prober_follows_configured_backend() {
        assert_eq!(Prober::default().backend(), ProbeBackend::Tcp);
        assert_eq!(Prober::new(ProbeBackend::Nmap).backend(), ProbeBackend::Nmap);
        assert_eq!("nmap".parse::<ProbeBackend>(), Ok(ProbeBackend::Nmap));
        assert!("icmp".parse::<ProbeBackend>().is_err());
    }
}
