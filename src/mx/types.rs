use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Preferred exchange of a domain and the address chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub mx_host: String,
    pub ip: IpAddr,
}

/// Which address to keep when an exchange resolves to several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressPreference {
    /// First IPv4 address, else the first address of any family.
    #[default]
    Ipv4,
    /// First IPv6 address, else the first address of any family.
    Ipv6,
    /// First address in the order the resolver returned them.
    Resolver,
}

impl AddressPreference {
    pub fn select(self, addrs: &[IpAddr]) -> Option<IpAddr> {
        let preferred = match self {
            Self::Ipv4 => addrs.iter().find(|ip| ip.is_ipv4()),
            Self::Ipv6 => addrs.iter().find(|ip| ip.is_ipv6()),
            Self::Resolver => None,
        };
        preferred.or_else(|| addrs.first()).copied()
    }
}

impl FromStr for AddressPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ipv4" => Ok(Self::Ipv4),
            "ipv6" => Ok(Self::Ipv6),
            "resolver" => Ok(Self::Resolver),
            other => Err(format!("unknown address preference '{other}'")),
        }
    }
}

impl fmt::Display for AddressPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Resolver => "resolver",
        })
    }
}

/// Name servers used for MX and address lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsUpstream {
    /// Whatever `/etc/resolv.conf` (or the platform equivalent) says.
    #[default]
    System,
    Google,
    Cloudflare,
    Quad9,
}

impl FromStr for DnsUpstream {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Self::System),
            "google" => Ok(Self::Google),
            "cloudflare" => Ok(Self::Cloudflare),
            "quad9" => Ok(Self::Quad9),
            other => Err(format!("unknown DNS upstream '{other}'")),
        }
    }
}

impl fmt::Display for DnsUpstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::System => "system",
            Self::Google => "google",
            Self::Cloudflare => "cloudflare",
            Self::Quad9 => "quad9",
        })
    }
}
