use serde_json::json;
use smtp_probe::{CheckError, CheckReport};

use super::args::Format;

pub fn render(format: Format, result: &Result<CheckReport, CheckError>) -> anyhow::Result<String> {
    let out = match (format, result) {
        (Format::Human, Ok(report)) => format!(
            "[OPEN]  {domain} -> {mx} ({ip}) port {port} in {ms} ms",
            domain = report.domain,
            mx = report.mx_host,
            ip = report.ip,
            port = report.port,
            ms = report.connection_time,
        ),
        (Format::Human, Err(err)) => match err.failure_kind() {
            Some(kind) => format!("[FAILED] {kind} :: {err}"),
            None => format!("[FAILED] {err}"),
        },
        (Format::Json, Ok(report)) => {
            let mut value = serde_json::to_value(report)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert("success".to_string(), json!(true));
            }
            serde_json::to_string_pretty(&value)?
        }
        (Format::Json, Err(err)) => serde_json::to_string_pretty(&json!({
            "success": false,
            "error": err.to_string(),
            "kind": err.failure_kind(),
        }))?,
    };
    Ok(out)
}
