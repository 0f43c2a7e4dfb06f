use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outcome of a handshake that completed before the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub duration_millis: u64,
}

impl ProbeResult {
    pub(crate) fn from_elapsed(elapsed: Duration) -> Self {
        Self {
            duration_millis: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Which probe implementation runs the reachability check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeBackend {
    /// Plain TCP connect from this process.
    #[default]
    Tcp,
    /// `nmap -Pn -p <port> <ip>` in a child process.
    Nmap,
}

impl FromStr for ProbeBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Self::Tcp),
            "nmap" => Ok(Self::Nmap),
            other => Err(format!("unknown probe backend '{other}'")),
        }
    }
}

impl fmt::Display for ProbeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tcp => "tcp",
            Self::Nmap => "nmap",
        })
    }
}
