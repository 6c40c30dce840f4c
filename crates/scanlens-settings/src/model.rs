use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `scanlens.toml` schema v1.
///
/// This is a *user-facing* config model: everything is optional so partial
/// files parse cleanly; [`crate::resolve_settings`] decides what a scan
/// actually requires.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanlensConfigV1 {
    /// Optional schema string for tooling (`scanlens.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub gate: GateConfig,
}

/// Where the external scanner lives and how to run it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScannerConfig {
    /// Scanner install directory (working directory for the scan).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_path: Option<String>,

    /// Interpreter executable used to run the scanner script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,

    /// Directory prepended to `PATH` for the scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter_dir: Option<String>,

    /// Scanner entry script, relative to `client_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,

    /// Report file the scanner writes, relative to `client_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_file: Option<String>,

    /// Status file the scanner writes, relative to `client_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_file: Option<String>,
}

/// Credentials and scheme identification passed to the scanner.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_template_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_sid: Option<String>,
}

/// Quality-gate policy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GateConfig {
    /// Maximum active issue count that still passes. Default 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u64>,
}
