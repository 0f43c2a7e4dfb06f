use thiserror::Error;

use crate::FailureKind;
use crate::mx::Error as MxError;
use crate::probe::ProbeError;

/// Everything that can stop a check. `Display` is the message shown to HTTP
/// and CLI users.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Either email or domain parameter is required")]
    MissingTarget,
    #[error(transparent)]
    Resolve(#[from] MxError),
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

impl CheckError {
    /// `None` for request errors that never reached DNS.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::MissingTarget => None,
            Self::Resolve(err) => Some(err.kind()),
            Self::Probe(err) => Some(err.kind()),
        }
    }
}
