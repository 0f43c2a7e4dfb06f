//! The full check: target domain → preferred MX → address → timed connect.
//!
//! [`check_target`] builds a resolver and a prober from [`CheckOptions`];
//! [`check_with`] takes them from the caller so they can be shared or stubbed.

mod error;
mod options;
mod target;

use std::net::IpAddr;

use serde::Serialize;
use tracing::{info, warn};

use crate::mx::{self, DnsLookup};
use crate::probe::{Probe, Prober};

pub use error::CheckError;
pub use options::{CheckOptions, DEFAULT_TIMEOUT_MS, SMTP_PORT};
pub use target::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    Open,
}

/// Successful check, shaped like the JSON the HTTP endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub domain: String,
    pub mx_host: String,
    pub ip: IpAddr,
    pub connection_time: u64,
    pub port: u16,
    pub status: PortStatus,
}

/// Run a check with a resolver and prober built from `options`.
pub async fn check_target(
    target: &Target,
    options: &CheckOptions,
) -> Result<CheckReport, CheckError> {
    let resolver = mx::build_resolver(options.dns)?;
    let prober = Prober::new(options.backend);
    check_with(target, options, &resolver, &prober).await
}

pub async fn check_with<R, P>(
    target: &Target,
    options: &CheckOptions,
    resolver: &R,
    prober: &P,
) -> Result<CheckReport, CheckError>
where
    R: DnsLookup,
    P: Probe,
{
    let domain = target.domain();
    let resolution = match mx::resolve_with(resolver, domain, options.address_preference).await {
        Ok(resolution) => resolution,
        Err(err) => {
            warn!(domain, kind = %err.kind(), error = %err, "mail exchange resolution failed");
            return Err(err.into());
        }
    };

    let outcome = prober
        .probe(resolution.ip, options.port, options.timeout())
        .await;
    let probe = match outcome {
        Ok(probe) => probe,
        Err(err) => {
            warn!(
                domain,
                mx_host = %resolution.mx_host,
                ip = %resolution.ip,
                kind = %err.kind(),
                error = %err,
                "mail exchange unreachable"
            );
            return Err(err.into());
        }
    };

    info!(
        domain,
        mx_host = %resolution.mx_host,
        ip = %resolution.ip,
        port = options.port,
        duration_ms = probe.duration_millis,
        "mail exchange reachable"
    );
    Ok(CheckReport {
        domain: domain.to_string(),
        mx_host: resolution.mx_host,
        ip: resolution.ip,
        connection_time: probe.duration_millis,
        port: options.port,
        status: PortStatus::Open,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;
    use crate::mx::tests::{StubResolver, ip};
    use crate::probe::{Connector, TcpProbe};
    use std::future;
    use std::io;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::time::Instant;
    use tracing_test::traced_test;

    /// Accepts after `delay`, or never when `delay` is `None`.
    struct ScriptedConnector {
        expect: SocketAddr,
        delay: Option<Duration>,
    }

    impl Connector for ScriptedConnector {
        type Stream = ();

        async fn connect(&self, addr: SocketAddr) -> io::Result<()> {
            assert_eq!(addr, self.expect);
            match self.delay {
                Some(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(())
                }
                None => future::pending().await,
            }
        }
    }

    fn scripted(delay: Option<Duration>) -> TcpProbe<ScriptedConnector> {
        TcpProbe::with_connector(ScriptedConnector {
            expect: "93.184.216.34:25".parse().unwrap(),
            delay,
        })
    }

    fn localhost_resolver() -> StubResolver {
        StubResolver::new(
            |_| Ok(vec![mx::MxRecord::new(10, "mail.example.com")]),
            |_| Ok(vec![ip("127.0.0.1")]),
        )
    }

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn reachable_exchange_reports_open_port() {
        let target = Target::Domain("example.com".into());
        let report = check_with(
            &target,
            &CheckOptions::default(),
            &StubResolver::example(),
            &scripted(Some(Duration::from_millis(12))),
        )
        .await
        .expect("check succeeds");

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "domain": "example.com",
                "mxHost": "mail.example.com",
                "ip": "93.184.216.34",
                "connectionTime": 12,
                "port": 25,
                "status": "open",
            })
        );
        assert!(logs_contain("mail exchange reachable"));
    }

    #[tokio::test]
    async fn email_target_resolves_its_domain() {
        let target = Target::from_params(Some("postmaster@example.com"), None).unwrap();
        let report = check_with(
            &target,
            &CheckOptions::default(),
            &StubResolver::example(),
            &scripted(Some(Duration::ZERO)),
        )
        .await
        .expect("check succeeds");
        assert_eq!(report.domain, "example.com");
        assert_eq!(report.mx_host, "mail.example.com");
    }

    #[tokio::test]
    async fn domain_without_mx_fails_before_probing() {
        let target = Target::Domain("example.com".into());
        let err = check_with(
            &target,
            &CheckOptions::default(),
            &StubResolver::without_mx(),
            &scripted(None),
        )
        .await
        .expect_err("no MX records");

        assert_eq!(err.failure_kind(), Some(FailureKind::NoMxRecords));
        insta::assert_snapshot!(err.to_string(), @"No MX records found");
    }

    #[tokio::test]
    #[traced_test]
    async fn address_lookup_failure_is_logged_like_mx_failure() {
        let resolver = StubResolver::new(
            |_| Ok(vec![mx::MxRecord::new(10, "mail.example.com")]),
            |_| Err("connection refused by upstream".into()),
        );
        let err = check_with(
            &Target::Domain("example.com".into()),
            &CheckOptions::default(),
            &resolver,
            &scripted(None),
        )
        .await
        .expect_err("exchange has no address");

        assert_eq!(err.failure_kind(), Some(FailureKind::ResolutionError));
        assert!(logs_contain("mail exchange resolution failed"));
        assert!(logs_contain("mail.example.com"));
        assert!(logs_contain("kind=resolution_error"));

        let err = check_with(
            &Target::Domain("example.com".into()),
            &CheckOptions::default(),
            &StubResolver::new(|_| Err("SERVFAIL".into()), |_| unreachable!()),
            &scripted(None),
        )
        .await
        .expect_err("MX lookup fails");
        assert_eq!(err.failure_kind(), Some(FailureKind::ResolutionError));
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("mail exchange resolution failed"))
                .count()
            {
                2 => Ok(()),
                n => Err(format!("expected one log line per failure, got {n}")),
            }
        });
    }

    #[tokio::test]
    async fn closed_smtp_port_fails_fast_with_connection_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
            listener.local_addr().expect("addr").port()
        };
        let options = CheckOptions {
            port,
            ..CheckOptions::default()
        };

        let started = std::time::Instant::now();
        let err = check_with(
            &Target::Domain("example.com".into()),
            &options,
            &localhost_resolver(),
            &TcpProbe::new(),
        )
        .await
        .expect_err("port is closed");

        assert_eq!(err.failure_kind(), Some(FailureKind::ConnectionError));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn open_local_port_is_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let options = CheckOptions {
            port: listener.local_addr().expect("addr").port(),
            ..CheckOptions::default()
        };

        let report = check_with(
            &Target::Domain("example.com".into()),
            &options,
            &localhost_resolver(),
            &TcpProbe::new(),
        )
        .await
        .expect("check succeeds");
        assert_eq!(report.ip, ip("127.0.0.1"));
        assert_eq!(report.port, options.port);
        assert!(report.connection_time < DEFAULT_TIMEOUT_MS);
    }

    #[tokio::test(start_paused = true)]
    async fn blackholed_exchange_times_out_after_default_window() {
        let started = Instant::now();
        let err = check_with(
            &Target::Domain("example.com".into()),
            &CheckOptions::default(),
            &StubResolver::example(),
            &scripted(None),
        )
        .await
        .expect_err("exchange never answers");

        assert_eq!(err.failure_kind(), Some(FailureKind::ConnectionTimeout));
        assert_eq!(started.elapsed(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
        insta::assert_snapshot!(err.to_string(), @"Connection timeout");
    }

    #[test]
    fn missing_target_has_no_failure_kind() {
        assert_eq!(CheckError::MissingTarget.failure_kind(), None);
    }
}
