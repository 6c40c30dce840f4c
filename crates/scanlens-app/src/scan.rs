use crate::aggregate::{aggregate_report, AggregateInput, AggregateOutput};
use crate::gate::ScanGate;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use scanlens_annotate::AnnotationRegistry;
use scanlens_process::{supervise, LogSink, ScanCommand};
use scanlens_settings::ResolvedSettings;
use std::sync::Arc;

/// Input for a full scan: settings, a target, and the shared services.
pub struct ScanInput<'a> {
    pub settings: &'a ResolvedSettings,
    /// Directory handed to the scanner with `-s`.
    pub source_dir: &'a Utf8Path,
    /// File name inside `source_dir` for single-file scans.
    pub target_file: Option<&'a str>,
    pub registry: &'a AnnotationRegistry,
    /// Receives scanner output and engine notices, line by line.
    pub sink: Arc<dyn LogSink>,
}

/// Launch the external scanner for the target and aggregate its report.
///
/// The whole pipeline runs on the calling thread and blocks until the
/// scanner exits; hosts with an interactive thread must call this from a
/// background one. The gate is claimed for the duration and released on
/// every exit path.
pub fn run_scan(input: ScanInput<'_>, gate: &ScanGate) -> anyhow::Result<AggregateOutput> {
    let _permit = match gate.try_acquire() {
        Some(permit) => permit,
        None => anyhow::bail!("a scan is already in flight; wait for it to finish"),
    };

    let command = scan_command(input.settings, input.source_dir, input.target_file);
    tracing::debug!(line = %command.shell_line(), "launching scanner");

    let status = supervise(command.to_command(), Arc::clone(&input.sink))
        .context("launch scanner process")?;
    input
        .sink
        .line(&format!("[scanlens] scanner exited with {status}"));

    let scan_root = scan_root(input.source_dir, input.target_file);
    let output = aggregate_report(AggregateInput {
        root: &scan_root,
        report_path: &input.settings.report_path,
        registry: input.registry,
        scanner_exit_code: status.code(),
    })?;

    for warning in &output.warnings {
        input.sink.line(&format!("[scanlens] {warning}"));
    }

    Ok(output)
}

fn scan_command(
    settings: &ResolvedSettings,
    source_dir: &Utf8Path,
    target_file: Option<&str>,
) -> ScanCommand {
    ScanCommand {
        install_dir: settings.client_path.clone(),
        interpreter: settings.interpreter.clone(),
        interpreter_dir: settings.interpreter_dir.clone(),
        script: settings.script.clone(),
        token: settings.token.clone(),
        scheme_template_id: settings.scheme_template_id.clone(),
        org_sid: settings.org_sid.clone(),
        source_dir: source_dir.to_owned(),
        target_file: target_file.map(str::to_string),
    }
}

fn scan_root(source_dir: &Utf8Path, target_file: Option<&str>) -> Utf8PathBuf {
    match target_file {
        Some(file) => source_dir.join(file),
        None => source_dir.to_owned(),
    }
}
