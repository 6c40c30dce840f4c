use camino::Utf8PathBuf;
use std::process::Command;

/// Everything needed to invoke the external scanner for one target.
///
/// The scanner is driven as `<interpreter> <script> quickinit …` followed by
/// `… quickscan …`, chained with `&&` through the platform shell, run from
/// its install directory, with the interpreter's directory prepended to
/// `PATH`.
#[derive(Clone, Debug)]
pub struct ScanCommand {
    /// Scanner install directory; becomes the working directory.
    pub install_dir: Utf8PathBuf,
    /// Interpreter executable used to run the scanner script.
    pub interpreter: Utf8PathBuf,
    /// Directory prepended to `PATH` so the script finds its interpreter.
    pub interpreter_dir: Option<Utf8PathBuf>,
    /// Scanner entry script, relative to the install directory.
    pub script: String,

    pub token: String,
    pub scheme_template_id: String,
    pub org_sid: String,

    /// Directory handed to the scanner with `-s`.
    pub source_dir: Utf8PathBuf,
    /// Single-file scans pass the file name separately with `--file`.
    pub target_file: Option<String>,
}

impl ScanCommand {
    /// The full shell line: init step and scan step chained with `&&`.
    pub fn shell_line(&self) -> String {
        format!(
            "{} && {}",
            self.step_line("quickinit", false),
            self.step_line("quickscan", true)
        )
    }

    fn step_line(&self, subcommand: &str, with_source: bool) -> String {
        let mut line = format!(
            "{} {} {} -t {} --scheme-template-id {} --org-sid {}",
            self.interpreter, self.script, subcommand, self.token, self.scheme_template_id,
            self.org_sid
        );
        if with_source {
            line.push_str(&format!(" -s {}", self.source_dir));
            if let Some(file) = &self.target_file {
                line.push_str(&format!(" --file {file}"));
            }
        }
        line
    }

    /// Build the ready-to-spawn process: platform shell wrapper, working
    /// directory, `PATH` extension.
    pub fn to_command(&self) -> Command {
        let shell_line = self.shell_line();
        let mut command = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/c").arg(&shell_line);
            c
        } else {
            let mut c = Command::new("bash");
            c.arg("-c").arg(&shell_line);
            c
        };
        command.current_dir(self.install_dir.as_std_path());

        if let Some(dir) = &self.interpreter_dir {
            let existing = std::env::var("PATH").unwrap_or_default();
            let separator = if cfg!(windows) { ';' } else { ':' };
            command.env("PATH", format!("{dir}{separator}{existing}"));
        }

        command
    }
}
