use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::mx::{AddressPreference, DnsUpstream};
use crate::probe::ProbeBackend;

pub const SMTP_PORT: u16 = 25;
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Configuration knobs for [`check_target`](crate::check_target).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    pub port: u16,
    pub timeout_ms: u64,
    pub backend: ProbeBackend,
    pub address_preference: AddressPreference,
    pub dns: DnsUpstream,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            port: SMTP_PORT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            backend: ProbeBackend::default(),
            address_preference: AddressPreference::default(),
            dns: DnsUpstream::default(),
        }
    }
}

impl CheckOptions {
    /// Deadline for the connection attempt.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
