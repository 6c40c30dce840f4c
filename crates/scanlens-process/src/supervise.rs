use crate::sink::LogSink;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Why a scan process could not be supervised to completion.
///
/// A scanner that *runs* and exits non-zero is not an error here; the exit
/// status is the caller's to interpret.
#[derive(Debug, thiserror::Error)]
pub enum SuperviseError {
    #[error("failed to launch scanner process: {0}")]
    Launch(#[source] std::io::Error),
    #[error("failed while waiting for scanner exit: {0}")]
    Wait(#[source] std::io::Error),
}

/// Cooperative cancellation for a running scan.
///
/// The default behavior is to run the scanner to completion; cancellation
/// exists as a robustness hook for hosts that need it. Cancelling kills the
/// process and lets the readers drain whatever output remains.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Run `command` to completion, draining both output streams into `sink`.
pub fn supervise(command: Command, sink: Arc<dyn LogSink>) -> Result<ExitStatus, SuperviseError> {
    supervise_with_cancel(command, sink, &CancelToken::new())
}

/// [`supervise`], with a cancellation hook.
///
/// Guarantees:
/// - every line a stream produces reaches the sink in that stream's order;
/// - a read failure on one stream is reported through the sink and affects
///   neither the other stream nor the wait for process exit;
/// - both readers have finished when this returns.
pub fn supervise_with_cancel(
    mut command: Command,
    sink: Arc<dyn LogSink>,
    cancel: &CancelToken,
) -> Result<ExitStatus, SuperviseError> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(SuperviseError::Launch)?;

    tracing::debug!(pid = child.id(), "scanner process started");

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let out_reader = spawn_reader("stdout", stdout, Arc::clone(&sink));
    let err_reader = spawn_reader("stderr", stderr, Arc::clone(&sink));

    // Block until exit. Polling (rather than a hard `wait`) is what lets a
    // cancellation request take effect; uncancelled runs behave as before.
    let mut kill_sent = false;
    let status = loop {
        if cancel.is_cancelled() && !kill_sent {
            kill_sent = true;
            if let Err(err) = child.kill() {
                tracing::debug!(%err, "kill after cancellation failed");
            } else {
                sink.line("[scanlens] scan cancelled, scanner killed");
            }
        }
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => std::thread::sleep(POLL_INTERVAL),
            Err(err) => {
                join_reader(out_reader);
                join_reader(err_reader);
                return Err(SuperviseError::Wait(err));
            }
        }
    };

    // The streams close with the process; joining here only makes sure both
    // are fully drained before the caller goes looking for the report.
    join_reader(out_reader);
    join_reader(err_reader);

    tracing::debug!(?status, "scanner process finished");
    Ok(status)
}

fn spawn_reader<R>(
    stream: &'static str,
    pipe: Option<R>,
    sink: Arc<dyn LogSink>,
) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    std::thread::spawn(move || {
        let Some(pipe) = pipe else {
            return;
        };
        for line in BufReader::new(pipe).lines() {
            match line {
                Ok(line) => sink.line(&line),
                Err(err) => {
                    // Report and stop this reader; the sibling stream and the
                    // wait for exit keep going.
                    sink.line(&format!("[scanlens] {stream} read error: {err}"));
                    break;
                }
            }
        }
    })
}

fn join_reader(handle: JoinHandle<()>) {
    if handle.join().is_err() {
        tracing::debug!("output reader thread panicked");
    }
}
