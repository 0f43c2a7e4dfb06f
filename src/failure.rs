use std::fmt;

use serde::Serialize;

/// Category of a failed reachability check.
///
/// Every error produced by the resolver or the prober maps onto exactly one
/// of these; the HTTP and CLI surfaces only ever print the message, but the
/// category stays available to library callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The MX query succeeded but returned no records.
    NoMxRecords,
    /// DNS failed at the MX stage or at the address stage.
    ResolutionError,
    /// The TCP handshake did not complete before the deadline.
    ConnectionTimeout,
    /// Refused, unreachable, reset, or any other transport failure.
    ConnectionError,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoMxRecords => "no_mx_records",
            Self::ResolutionError => "resolution_error",
            Self::ConnectionTimeout => "connection_timeout",
            Self::ConnectionError => "connection_error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
