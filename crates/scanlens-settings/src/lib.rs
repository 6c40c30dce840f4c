//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration
//! provided as strings; the CLI decides where the file lives. An empty config
//! is allowed, and validation only rejects what a scan actually needs.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{AuthConfig, GateConfig, ScanlensConfigV1, ScannerConfig};
pub use resolve::{resolve_settings, Overrides, ResolvedSettings};

/// Parse `scanlens.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ScanlensConfigV1> {
    let cfg: ScanlensConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}
