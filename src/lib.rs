#![forbid(unsafe_code)]
//! smtp_probe — is a domain's mail exchange reachable on the SMTP port?
//!
//! Resolves the preferred MX host of a domain, picks one of its addresses and
//! times a bare TCP handshake against it.

pub mod check;
mod failure;
pub mod mx;
pub mod probe;
pub mod server;

pub use check::{
    CheckError, CheckOptions, CheckReport, DEFAULT_TIMEOUT_MS, PortStatus, SMTP_PORT, Target,
    check_target, check_with,
};
pub use failure::FailureKind;
pub use mx::{
    AddressPreference, DnsLookup, DnsUpstream, Error as MxError, MxRecord, Resolution, resolve,
};
pub use probe::{Probe, ProbeBackend, ProbeError, ProbeResult, Prober, probe};
