use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::FailureKind;

/// Errors that end a reachability probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid IP address '{input}'")]
    InvalidAddress { input: String },
    #[error("Connection timeout")]
    Timeout { addr: SocketAddr, timeout: Duration },
    #[error("{source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("Port {port} is not open")]
    PortClosed { port: u16 },
    #[error("port scanner failed: {message}")]
    Scanner { message: String },
}

impl ProbeError {
    pub(crate) fn connect(addr: SocketAddr, source: io::Error) -> Self {
        Self::Connect { addr, source }
    }

    pub(crate) fn scanner(message: impl Into<String>) -> Self {
        Self::Scanner {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout { .. } => FailureKind::ConnectionTimeout,
            _ => FailureKind::ConnectionError,
        }
    }
}
