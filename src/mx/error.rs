use std::fmt;

use thiserror::Error;
use trust_dns_resolver::error::ResolveError;

use crate::FailureKind;

#[derive(Debug, Error)]
pub enum MxError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
    #[error("resolver initialization failed: {message}")]
    ResolverInit { message: String },
    #[error("No MX records found")]
    NoRecords,
    #[error("MX lookup failed: {source}")]
    Lookup {
        #[source]
        source: ResolveError,
    },
    #[error("address lookup for {host} failed: {source}")]
    AddressLookup {
        host: String,
        #[source]
        source: ResolveError,
    },
    #[error("no address found for {host}")]
    NoAddresses { host: String },
}

impl MxError {
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::IdnaConversion { source }
    }

    pub(crate) fn resolver_init(source: impl fmt::Display) -> Self {
        Self::ResolverInit {
            message: source.to_string(),
        }
    }

    pub(crate) fn lookup(source: ResolveError) -> Self {
        Self::Lookup { source }
    }

    pub(crate) fn address_lookup(host: &str, source: ResolveError) -> Self {
        Self::AddressLookup {
            host: host.to_string(),
            source,
        }
    }

    /// Only an empty MX answer is reported as [`FailureKind::NoMxRecords`];
    /// everything else the resolver can hit is a resolution error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NoRecords => FailureKind::NoMxRecords,
            _ => FailureKind::ResolutionError,
        }
    }
}
