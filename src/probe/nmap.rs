use std::net::IpAddr;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::{self, Instant};
use tracing::debug;

use super::{Probe, ProbeError, ProbeResult};

const DEFAULT_PROGRAM: &str = "nmap";

/// Port-scan probe that delegates to an external `nmap` binary.
///
/// The reported duration covers the whole scan, process start included, so it
/// is not comparable with [`TcpProbe`](super::TcpProbe) timings.
#[derive(Debug, Clone)]
pub struct NmapProbe {
    program: PathBuf,
}

impl Default for NmapProbe {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
        }
    }
}

impl NmapProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Probe for NmapProbe {
    async fn probe(
        &self,
        ip: IpAddr,
        port: u16,
        timeout: Duration,
    ) -> Result<ProbeResult, ProbeError> {
        let started = Instant::now();
        let mut command = Command::new(&self.program);
        command
            .arg("-Pn")
            .arg("-p")
            .arg(port.to_string())
            .arg(ip.to_string())
            .stdin(Stdio::null())
            .kill_on_drop(true);
        debug!(program = %self.program.display(), %ip, port, "running port scan");

        let output = match time::timeout(timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                debug!(program = %self.program.display(), error = %err, "failed to run port scanner");
                return Err(ProbeError::scanner(err.to_string()));
            }
            Err(_) => {
                debug!(%ip, port, "port scan timed out");
                return Err(ProbeError::Timeout {
                    addr: (ip, port).into(),
                    timeout,
                });
            }
        };
        let elapsed = started.elapsed();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProbeError::scanner(format!(
                "{}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if reports_open(&stdout, port) {
            Ok(ProbeResult::from_elapsed(elapsed))
        } else {
            debug!(%ip, port, "port scan did not report the port open");
            Err(ProbeError::PortClosed { port })
        }
    }
}

/// Looks for the `<port>/tcp open` row of nmap's normal output. `open|filtered`
/// and the other ambiguous states do not count.
pub(crate) fn reports_open(stdout: &str, port: u16) -> bool {
    let needle = format!("{port}/tcp");
    stdout.lines().any(|line| {
        let mut cols = line.split_whitespace();
        cols.next() == Some(needle.as_str()) && cols.next() == Some("open")
    })
}
