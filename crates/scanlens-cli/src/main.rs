//! CLI entry point for scanlens.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and
//! exit codes. All business logic lives in the `scanlens-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use scanlens_annotate::AnnotationRegistry;
use scanlens_app::{aggregate_report, run_gate, run_scan, AggregateInput, ScanGate, ScanInput};
use scanlens_process::LogSink;
use scanlens_settings::Overrides;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "scanlens",
    version,
    about = "Scan-result aggregation and quality gating for external code scanners"
)]
struct Cli {
    /// Path to scanlens config TOML.
    #[arg(long, default_value = "scanlens.toml")]
    config: Utf8PathBuf,

    /// Override the scanner auth token.
    #[arg(long)]
    token: Option<String>,

    /// Override the gate threshold.
    #[arg(long)]
    threshold: Option<u64>,

    /// Override the report file name under the scanner install directory.
    #[arg(long)]
    report_file: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the external scanner over a directory and print the result tree.
    Scan {
        /// Directory to scan.
        source_dir: Utf8PathBuf,

        /// Scan a single file inside the directory instead.
        #[arg(long)]
        file: Option<String>,
    },

    /// Aggregate an existing report file offline and print the result tree.
    Report {
        /// Directory (or single file) the report describes.
        #[arg(long)]
        root: Utf8PathBuf,

        /// Path to the scanner's JSON report.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Print the run summary as JSON instead of the tree.
        #[arg(long)]
        json: bool,

        /// Print a Markdown report instead of the tree.
        #[arg(long)]
        markdown: bool,
    },

    /// Evaluate the quality gate over a scan status file.
    Gate {
        /// Path to the scanner's `scan_status.json`. When omitted, the
        /// config's resolved status path is used.
        #[arg(long)]
        status: Option<Utf8PathBuf>,
    },

    /// Print per-line annotations from an existing report.
    Annotations {
        /// Directory (or single file) the report describes.
        #[arg(long)]
        root: Utf8PathBuf,

        /// Path to the scanner's JSON report.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Only print annotations for this file (path under the root).
        #[arg(long)]
        file: Option<Utf8PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Scan {
            ref source_dir,
            ref file,
        } => cmd_scan(&cli, source_dir.clone(), file.clone()),
        Commands::Report {
            root,
            report,
            json,
            markdown,
        } => cmd_report(root, report, json, markdown),
        Commands::Gate { ref status } => cmd_gate(&cli, status.clone()),
        Commands::Annotations { root, report, file } => cmd_annotations(root, report, file),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        token: cli.token.clone(),
        threshold: cli.threshold,
        report_file: cli.report_file.clone(),
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<scanlens_settings::ResolvedSettings> {
    let text = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("read config: {}", cli.config))?;
    let cfg = scanlens_settings::parse_config_toml(&text).context("parse config")?;
    scanlens_settings::resolve_settings(cfg, overrides(cli)).context("resolve config")
}

fn cmd_scan(cli: &Cli, source_dir: Utf8PathBuf, file: Option<String>) -> anyhow::Result<()> {
    let settings = load_settings(cli)?;
    let registry = AnnotationRegistry::new();
    let gate = ScanGate::new();
    // Scanner output goes to stderr as it arrives; the tree goes to stdout.
    let sink: Arc<dyn LogSink> = Arc::new(|line: &str| eprintln!("{line}"));

    let output = run_scan(
        ScanInput {
            settings: &settings,
            source_dir: &source_dir,
            target_file: file.as_deref(),
            registry: &registry,
            sink,
        },
        &gate,
    )?;

    print!("{}", scanlens_render::render_tree(&output.tree));
    println!(
        "{} issues in {} files, {} unattached",
        output.summary.counts.total, output.summary.matched_files, output.summary.unattached_issues
    );
    Ok(())
}

fn cmd_report(
    root: Utf8PathBuf,
    report: Utf8PathBuf,
    json: bool,
    markdown: bool,
) -> anyhow::Result<()> {
    let registry = AnnotationRegistry::new();
    let output = aggregate_report(AggregateInput {
        root: &root,
        report_path: &report,
        registry: &registry,
        scanner_exit_code: None,
    })?;

    for warning in &output.warnings {
        eprintln!("scanlens: {warning}");
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output.summary).context("serialize summary")?
        );
    } else if markdown {
        print!(
            "{}",
            scanlens_render::render_markdown(&output.summary, &output.tree)
        );
    } else {
        print!("{}", scanlens_render::render_tree(&output.tree));
    }
    Ok(())
}

fn cmd_gate(cli: &Cli, status: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let (status_path, threshold) = gate_inputs(cli, status)?;
    let verdict = run_gate(&status_path, threshold)?;
    println!("{}", scanlens_render::render_gate(&verdict));
    let code = scanlens_app::gate_exit_code(&verdict);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Where to read the status file and what threshold to gate on.
///
/// `--threshold` wins over `[gate] threshold` in the config. With an explicit
/// `--status` the config is optional and only its threshold is consulted;
/// without one the full config must resolve, and the scanner's status path is
/// taken from it.
fn gate_inputs(cli: &Cli, status: Option<Utf8PathBuf>) -> anyhow::Result<(Utf8PathBuf, u64)> {
    match status {
        Some(path) => {
            let threshold = match cli.threshold {
                Some(threshold) => threshold,
                None => match std::fs::read_to_string(&cli.config) {
                    Ok(text) => scanlens_settings::parse_config_toml(&text)
                        .context("parse config")?
                        .gate
                        .threshold
                        .unwrap_or(0),
                    Err(_) => 0,
                },
            };
            Ok((path, threshold))
        }
        None => {
            let settings = load_settings(cli)?;
            Ok((settings.status_path, settings.threshold))
        }
    }
}

fn cmd_annotations(
    root: Utf8PathBuf,
    report: Utf8PathBuf,
    file: Option<Utf8PathBuf>,
) -> anyhow::Result<()> {
    let registry = AnnotationRegistry::new();
    aggregate_report(AggregateInput {
        root: &root,
        report_path: &report,
        registry: &registry,
        scanner_exit_code: None,
    })?;

    let files = match file {
        Some(file) => vec![root.join(file)],
        None => registry.annotated_files(),
    };
    for path in files {
        let lines = registry.consume(&path);
        if lines.is_empty() {
            continue;
        }
        print!("{}", scanlens_render::render_annotations(&path, &lines));
    }
    Ok(())
}
