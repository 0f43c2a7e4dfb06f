use std::future::Future;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::{self, Instant};
use tracing::debug;

use super::{Probe, ProbeError, ProbeResult};

/// Opens the TCP connection a probe measures.
pub trait Connector: Send + Sync {
    type Stream: Send;

    fn connect(&self, addr: SocketAddr) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, addr: SocketAddr) -> io::Result<Self::Stream> {
        TcpStream::connect(addr).await
    }
}

/// Handshake-only probe: connect, time it, close. Nothing is read or written.
#[derive(Debug, Clone, Default)]
pub struct TcpProbe<C = TcpConnector> {
    connector: C,
}

impl<C: Connector> TcpProbe<C> {
    pub fn with_connector(connector: C) -> Self {
        Self { connector }
    }
}

impl TcpProbe {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Connector> Probe for TcpProbe<C> {
    async fn probe(
        &self,
        ip: IpAddr,
        port: u16,
        timeout: Duration,
    ) -> Result<ProbeResult, ProbeError> {
        let addr = SocketAddr::new(ip, port);
        let started = Instant::now();
        debug!(%addr, timeout_ms = timeout.as_millis() as u64, "connecting");

        // The connect future is dropped as soon as the timer wins, which
        // releases the half-open socket; a stream that did connect is dropped
        // right after the clock is read.
        match time::timeout(timeout, self.connector.connect(addr)).await {
            Ok(Ok(stream)) => {
                let elapsed = started.elapsed();
                drop(stream);
                if elapsed >= timeout {
                    debug!(%addr, "handshake completed past the deadline");
                    return Err(ProbeError::Timeout { addr, timeout });
                }
                let result = ProbeResult::from_elapsed(elapsed);
                debug!(%addr, duration_ms = result.duration_millis, "connected");
                Ok(result)
            }
            Ok(Err(source)) => {
                debug!(%addr, error = %source, "connection failed");
                Err(ProbeError::connect(addr, source))
            }
            Err(_) => {
                debug!(%addr, "connection timed out");
                Err(ProbeError::Timeout { addr, timeout })
            }
        }
    }
}
