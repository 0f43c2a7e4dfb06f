use std::future::Future;
use std::net::IpAddr;

use tracing::debug;
use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::system_conf::read_system_conf;

use super::{AddressPreference, DnsUpstream, Error, MxRecord, Resolution};

/// Build an async resolver for the requested upstream.
///
/// The answer cache is disabled: every check sees what DNS says right now.
pub fn build_resolver(upstream: DnsUpstream) -> Result<TokioAsyncResolver, Error> {
    let (config, mut opts) = match upstream {
        DnsUpstream::System => read_system_conf().map_err(Error::resolver_init)?,
        DnsUpstream::Google => (ResolverConfig::google(), ResolverOpts::default()),
        DnsUpstream::Cloudflare => (ResolverConfig::cloudflare(), ResolverOpts::default()),
        DnsUpstream::Quad9 => (ResolverConfig::quad9(), ResolverOpts::default()),
    };
    opts.cache_size = 0;
    debug!(%upstream, "building DNS resolver");
    Ok(TokioAsyncResolver::tokio(config, opts))
}

/// Resolve the preferred mail exchange of `domain` with a fresh resolver.
///
/// The domain is normalized via IDNA before querying DNS.
pub async fn resolve(
    domain: &str,
    upstream: DnsUpstream,
    preference: AddressPreference,
) -> Result<Resolution, Error> {
    let resolver = build_resolver(upstream)?;
    resolve_with(&resolver, domain, preference).await
}

pub async fn resolve_with<R>(
    resolver: &R,
    domain: &str,
    preference: AddressPreference,
) -> Result<Resolution, Error>
where
    R: DnsLookup,
{
    let ascii = normalize_domain(domain)?;
    debug!(domain = %ascii, "looking up MX records");

    let records = resolver.lookup_mx(&ascii).await.map_err(Error::lookup)?;
    let primary = select_primary(&records).ok_or(Error::NoRecords)?;
    debug!(
        domain = %ascii,
        exchange = %primary.exchange,
        preference = primary.preference,
        candidates = records.len(),
        "selected mail exchange"
    );

    let addrs = resolver
        .lookup_ip(&primary.exchange)
        .await
        .map_err(|err| Error::address_lookup(&primary.exchange, err))?;
    let ip = preference
        .select(&addrs)
        .ok_or_else(|| Error::NoAddresses {
            host: primary.exchange.clone(),
        })?;
    debug!(exchange = %primary.exchange, %ip, "resolved mail exchange address");

    Ok(Resolution {
        mx_host: primary.exchange.clone(),
        ip,
    })
}

/// Lowest preference wins; among equals the first record in DNS order is kept.
pub fn select_primary(records: &[MxRecord]) -> Option<&MxRecord> {
    records.iter().min_by_key(|record| record.preference)
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(Error::idna)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

/// DNS queries needed to pick and address a mail exchange.
pub trait DnsLookup: Send + Sync {
    /// MX records in the order the resolver returned them. A successful
    /// answer without records is an empty vector, not an error.
    fn lookup_mx(
        &self,
        domain: &str,
    ) -> impl Future<Output = Result<Vec<MxRecord>, ResolveError>> + Send;

    fn lookup_ip(&self, host: &str)
    -> impl Future<Output = Result<Vec<IpAddr>, ResolveError>> + Send;
}

impl DnsLookup for TokioAsyncResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = match self.mx_lookup(domain).await {
            Ok(lookup) => lookup,
            Err(err) if is_empty_answer(&err) => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }

    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError> {
        let lookup = TokioAsyncResolver::lookup_ip(self, host).await?;
        Ok(lookup.iter().collect())
    }
}

// NXDOMAIN is a lookup failure; only NOERROR with an empty answer counts as
// "no records".
pub(super) fn is_empty_answer(err: &ResolveError) -> bool {
    matches!(
        err.kind(),
        ResolveErrorKind::NoRecordsFound { response_code, .. } if *response_code == ResponseCode::NoError
    )
}
