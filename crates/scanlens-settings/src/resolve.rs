use crate::model::ScanlensConfigV1;
use camino::Utf8PathBuf;

const DEFAULT_SCRIPT: &str = "codepuppy.py";
const DEFAULT_REPORT_FILE: &str = "quick_scan_report.json";
const DEFAULT_STATUS_FILE: &str = "scan_status.json";

/// CLI-level overrides, applied on top of the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub threshold: Option<u64>,
    pub report_file: Option<String>,
}

/// The effective settings a scan runs with. All paths are resolved, all
/// required fields present.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSettings {
    pub client_path: Utf8PathBuf,
    pub interpreter: Utf8PathBuf,
    pub interpreter_dir: Option<Utf8PathBuf>,
    pub script: String,

    /// Absolute location of the report the scanner writes.
    pub report_path: Utf8PathBuf,
    /// Absolute location of `scan_status.json`.
    pub status_path: Utf8PathBuf,

    pub token: String,
    pub scheme_template_id: String,
    pub org_sid: String,

    pub threshold: u64,
}

/// Resolve config + overrides into settings a scan can run with.
///
/// Misconfiguration aborts the scan being set up, nothing more; the caller
/// reports the error through its usual sink and stays alive.
pub fn resolve_settings(
    cfg: ScanlensConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedSettings> {
    let client_path = require(cfg.scanner.client_path, "scanner.client_path")?;
    let interpreter = require(cfg.scanner.interpreter, "scanner.interpreter")?;
    let token = overrides
        .token
        .or(cfg.auth.token)
        .filter(|t| !t.trim().is_empty());
    let token = match token {
        Some(token) => token,
        None => anyhow::bail!("missing required setting: auth.token"),
    };
    let scheme_template_id = require(cfg.auth.scheme_template_id, "auth.scheme_template_id")?;
    let org_sid = require(cfg.auth.org_sid, "auth.org_sid")?;

    let client_path = Utf8PathBuf::from(client_path);
    let report_file = overrides
        .report_file
        .or(cfg.scanner.report_file)
        .unwrap_or_else(|| DEFAULT_REPORT_FILE.to_string());
    let status_file = cfg
        .scanner
        .status_file
        .unwrap_or_else(|| DEFAULT_STATUS_FILE.to_string());

    Ok(ResolvedSettings {
        report_path: client_path.join(&report_file),
        status_path: client_path.join(&status_file),
        client_path,
        interpreter: Utf8PathBuf::from(interpreter),
        interpreter_dir: cfg.scanner.interpreter_dir.map(Utf8PathBuf::from),
        script: cfg.scanner.script.unwrap_or_else(|| DEFAULT_SCRIPT.to_string()),
        token,
        scheme_template_id,
        org_sid,
        threshold: overrides.threshold.or(cfg.gate.threshold).unwrap_or(0),
    })
}

fn require(value: Option<String>, name: &str) -> anyhow::Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => anyhow::bail!("missing required setting: {name}"),
    }
}
