//! DNS side of the check: MX lookup, preferred-exchange selection and
//! address resolution.
//!
//! The public entry point is [`resolve`], which queries the configured
//! upstream and returns the [`Resolution`] the prober should target.

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{DnsLookup, build_resolver, resolve, resolve_with, select_primary};
pub use types::{AddressPreference, DnsUpstream, MxRecord, Resolution};
