use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use smtp_probe::{
    AddressPreference, CheckOptions, DEFAULT_TIMEOUT_MS, DnsUpstream, ProbeBackend, SMTP_PORT,
};

#[derive(Parser)]
#[command(name = "smtp-probe", version, about = "MX lookup + TCP reachability of port 25")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    #[command(flatten)]
    pub probe: ProbeArgs,
}

#[derive(Args)]
pub struct ProbeArgs {
    /// port TCP testé sur l'hôte MX
    #[arg(long, global = true, env = "SMTP_PROBE_PORT", default_value_t = SMTP_PORT)]
    pub port: u16,

    /// délai maximal de connexion (ms)
    #[arg(
        long = "timeout-ms",
        global = true,
        env = "SMTP_PROBE_TIMEOUT_MS",
        default_value_t = DEFAULT_TIMEOUT_MS
    )]
    pub timeout_ms: u64,

    /// backend de sonde: tcp|nmap
    #[arg(long, global = true, env = "SMTP_PROBE_BACKEND", default_value_t = ProbeBackend::Tcp)]
    pub backend: ProbeBackend,

    /// famille d'adresse préférée: ipv4|ipv6|resolver
    #[arg(long, global = true, env = "SMTP_PROBE_PREFER", default_value_t = AddressPreference::Ipv4)]
    pub prefer: AddressPreference,

    /// serveurs DNS: system|google|cloudflare|quad9
    #[arg(long, global = true, env = "SMTP_PROBE_DNS", default_value_t = DnsUpstream::System)]
    pub dns: DnsUpstream,
}

#[derive(Subcommand)]
pub enum Commands {
    /// vérifie un domaine ou une adresse e-mail puis quitte
    Check {
        /// adresse e-mail (le domaine suit le '@')
        #[arg(long, conflicts_with = "domain", required_unless_present = "domain")]
        email: Option<String>,
        /// domaine à vérifier
        #[arg(long)]
        domain: Option<String>,
        /// format de sortie (human|json)
        #[arg(long, value_enum, default_value_t = Format::Human)]
        format: Format,
    },
    /// lance le service HTTP (GET /check)
    Serve {
        /// adresse d'écoute
        #[arg(long, env = "SMTP_PROBE_LISTEN", default_value = "127.0.0.1:3000")]
        listen: SocketAddr,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Human,
    Json,
}

impl ProbeArgs {
    pub fn options(&self) -> CheckOptions {
        CheckOptions {
            port: self.port,
            timeout_ms: self.timeout_ms,
            backend: self.backend,
            address_preference: self.prefer,
            dns: self.dns,
        }
    }
}
